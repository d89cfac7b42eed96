use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "game_status")]
pub enum GameStatus {
    #[sea_orm(string_value = "LIVE")]
    Live,
    #[sea_orm(string_value = "FINISHED")]
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "game_mode")]
pub enum GameMode {
    #[sea_orm(string_value = "STANDARD")]
    Standard,
    #[sea_orm(string_value = "HAND_BRAIN")]
    HandBrain,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "hb_role")]
pub enum HbRole {
    #[sea_orm(string_value = "BRAIN")]
    Brain,
    #[sea_orm(string_value = "HAND")]
    Hand,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "created_by")]
    pub created_by: Option<i64>,
    pub status: GameStatus,
    pub result: Option<String>,
    pub mode: GameMode,
    /// FEN of the current position; "startpos" denotes the initial position.
    #[sea_orm(column_type = "Text")]
    pub position: String,
    pub ply: i32,
    #[sea_orm(column_name = "turn_team")]
    pub turn_team: super::teams::Side,
    #[sea_orm(column_name = "turn_started_at")]
    pub turn_started_at: OffsetDateTime,
    #[sea_orm(column_name = "turn_deadline_at")]
    pub turn_deadline_at: OffsetDateTime,
    #[sea_orm(column_name = "turn_seconds")]
    pub turn_seconds: i32,
    #[sea_orm(column_name = "hb_current_role")]
    pub hb_current_role: Option<HbRole>,
    #[sea_orm(column_name = "hb_piece_hint")]
    pub hb_piece_hint: Option<String>,
    #[sea_orm(column_name = "hb_brain_member_id")]
    pub hb_brain_member_id: Option<i64>,
    #[sea_orm(column_name = "hb_hand_member_id")]
    pub hb_hand_member_id: Option<i64>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::teams::Entity")]
    Teams,
    #[sea_orm(has_many = "super::moves::Entity")]
    Moves,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl Related<super::moves::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Moves.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
