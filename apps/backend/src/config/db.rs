use std::env;

use crate::error::AppError;

/// Resolve the database URL.
///
/// `DATABASE_URL` wins when set; otherwise the URL is assembled from the
/// individual `POSTGRES_*` variables.
pub fn db_url() -> Result<String, AppError> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url);
    }

    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = must_var("POSTGRES_DB")?;
    let username = must_var("POSTGRES_USER")?;
    let password = must_var("POSTGRES_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::db_url;

    #[test]
    fn database_url_takes_precedence() {
        env::set_var("DATABASE_URL", "postgresql://u:p@db:5432/chess_teams");
        let url = db_url().unwrap();
        env::remove_var("DATABASE_URL");
        assert_eq!(url, "postgresql://u:p@db:5432/chess_teams");
    }
}
