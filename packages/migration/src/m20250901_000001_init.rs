use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Sub,
    Username,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    CreatedBy,
    Status,
    Result,
    Mode,
    Position,
    Ply,
    TurnTeam,
    TurnStartedAt,
    TurnDeadlineAt,
    TurnSeconds,
    HbCurrentRole,
    HbPieceHint,
    HbBrainMemberId,
    HbHandMemberId,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    GameId,
    Side,
    CurrentIndex,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TeamMembers {
    Table,
    Id,
    TeamId,
    GameId,
    UserId,
    Position,
    Active,
    ReadyToStart,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Moves {
    Table,
    Id,
    GameId,
    TeamId,
    Ply,
    Kind,
    Uci,
    San,
    PositionAfter,
    CreatedAt,
}

#[derive(Iden)]
enum GameStatusEnum {
    #[iden = "game_status"]
    Type,
}

#[derive(Iden)]
enum GameModeEnum {
    #[iden = "game_mode"]
    Type,
}

#[derive(Iden)]
enum TeamSideEnum {
    #[iden = "team_side"]
    Type,
}

#[derive(Iden)]
enum HbRoleEnum {
    #[iden = "hb_role"]
    Type,
}

#[derive(Iden)]
enum MoveKindEnum {
    #[iden = "move_kind"]
    Type,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // enum types (postgres only; sqlite stores these as TEXT)
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => {
                async fn enum_exists(
                    manager: &SchemaManager<'_>,
                    enum_name: &str,
                ) -> Result<bool, DbErr> {
                    let result = manager
                        .get_connection()
                        .query_one(Statement::from_string(
                            sea_orm::DatabaseBackend::Postgres,
                            format!("SELECT 1 FROM pg_type WHERE typname = '{}'", enum_name),
                        ))
                        .await?;
                    Ok(result.is_some())
                }

                if !enum_exists(manager, "game_status").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(GameStatusEnum::Type)
                                .values(["LIVE", "FINISHED"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "game_mode").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(GameModeEnum::Type)
                                .values(["STANDARD", "HAND_BRAIN"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "team_side").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(TeamSideEnum::Type)
                                .values(["A", "B"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "hb_role").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(HbRoleEnum::Type)
                                .values(["BRAIN", "HAND"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "move_kind").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(MoveKindEnum::Type)
                                .values(["NORMAL", "TIMEOUT", "PASS"])
                                .to_owned(),
                        )
                        .await?;
                }
            }
            sea_orm::DatabaseBackend::Sqlite => {
                // nothing to do
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        }

        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Sub).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_sub_unique")
                    .table(Users::Table)
                    .col(Users::Sub)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Games::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Games::Status)
                            .custom(GameStatusEnum::Type)
                            .not_null()
                            .default("LIVE"),
                    )
                    .col(ColumnDef::new(Games::Result).string().null())
                    .col(
                        ColumnDef::new(Games::Mode)
                            .custom(GameModeEnum::Type)
                            .not_null()
                            .default("STANDARD"),
                    )
                    .col(
                        ColumnDef::new(Games::Position)
                            .text()
                            .not_null()
                            .default("startpos"),
                    )
                    .col(ColumnDef::new(Games::Ply).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Games::TurnTeam)
                            .custom(TeamSideEnum::Type)
                            .not_null()
                            .default("A"),
                    )
                    .col(
                        ColumnDef::new(Games::TurnStartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::TurnDeadlineAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Games::TurnSeconds).integer().not_null())
                    .col(
                        ColumnDef::new(Games::HbCurrentRole)
                            .custom(HbRoleEnum::Type)
                            .null(),
                    )
                    .col(ColumnDef::new(Games::HbPieceHint).string().null())
                    .col(ColumnDef::new(Games::HbBrainMemberId).big_integer().null())
                    .col(ColumnDef::new(Games::HbHandMemberId).big_integer().null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::LockVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_created_by")
                            .from(Games::Table, Games::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_status")
                    .table(Games::Table)
                    .col(Games::Status)
                    .to_owned(),
            )
            .await?;

        // teams
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Teams::GameId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Teams::Side)
                            .custom(TeamSideEnum::Type)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Teams::CurrentIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Teams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Teams::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teams_game_id")
                            .from(Teams::Table, Teams::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_teams_game_side")
                    .table(Teams::Table)
                    .col(Teams::GameId)
                    .col(Teams::Side)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // team_members
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamMembers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(TeamMembers::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(TeamMembers::GameId).big_integer().not_null())
                    .col(ColumnDef::new(TeamMembers::UserId).big_integer().not_null())
                    .col(ColumnDef::new(TeamMembers::Position).integer().not_null())
                    .col(
                        ColumnDef::new(TeamMembers::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::ReadyToStart)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamMembers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_team_id")
                            .from(TeamMembers::Table, TeamMembers::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_game_id")
                            .from(TeamMembers::Table, TeamMembers::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_user_id")
                            .from(TeamMembers::Table, TeamMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_team_members_team_position")
                    .table(TeamMembers::Table)
                    .col(TeamMembers::TeamId)
                    .col(TeamMembers::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_team_members_game_user")
                    .table(TeamMembers::Table)
                    .col(TeamMembers::GameId)
                    .col(TeamMembers::UserId)
                    .to_owned(),
            )
            .await?;

        // moves
        manager
            .create_table(
                Table::create()
                    .table(Moves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Moves::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Moves::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Moves::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(Moves::Ply).integer().not_null())
                    .col(
                        ColumnDef::new(Moves::Kind)
                            .custom(MoveKindEnum::Type)
                            .not_null()
                            .default("NORMAL"),
                    )
                    .col(ColumnDef::new(Moves::Uci).string().null())
                    .col(ColumnDef::new(Moves::San).string().null())
                    .col(ColumnDef::new(Moves::PositionAfter).text().not_null())
                    .col(
                        ColumnDef::new(Moves::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moves_game_id")
                            .from(Moves::Table, Moves::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moves_team_id")
                            .from(Moves::Table, Moves::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_moves_game_ply")
                    .table(Moves::Table)
                    .col(Moves::GameId)
                    .col(Moves::Ply)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table

        manager
            .drop_index(
                Index::drop()
                    .name("ux_moves_game_ply")
                    .table(Moves::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Moves::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_team_members_game_user")
                    .table(TeamMembers::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ux_team_members_team_position")
                    .table(TeamMembers::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_teams_game_side")
                    .table(Teams::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_games_status")
                    .table(Games::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_users_sub_unique")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            for type_name in ["move_kind", "hb_role", "team_side", "game_mode", "game_status"] {
                manager
                    .get_connection()
                    .execute(Statement::from_string(
                        sea_orm::DatabaseBackend::Postgres,
                        format!("DROP TYPE IF EXISTS {}", type_name),
                    ))
                    .await?;
            }
        }

        Ok(())
    }
}
