use clap::Args;
use tiffin_app::{
    auth::{AuthServiceError, PgAuthService},
    database,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RevokeSessionArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Session UUID to revoke
    #[arg(long)]
    session_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeSessionArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    match PgAuthService::new(pool).revoke_session(args.session_uuid).await {
        Ok(_) => println!("revoked session {}", args.session_uuid),
        Err(AuthServiceError::NotFound) => {
            println!("session {} was not active", args.session_uuid);
        }
        Err(error) => return Err(format!("failed to revoke session: {error}")),
    }

    Ok(())
}
