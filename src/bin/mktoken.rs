use clap::Parser;

use todo_api_rust::auth::{generate_token, Claims};
use todo_api_rust::config::{Environment, SecurityConfig};

/// Sign a development bearer token for the To-Do API.
///
/// Identity issuance is external to the service; this exists so developers
/// and tests can mint a token against the configured JWT_SECRET.
#[derive(Parser)]
#[command(name = "mktoken", about = "Sign a development JWT for the To-Do API")]
struct Cli {
    /// Subject (user) id the token is issued for
    user_id: i64,

    /// Token lifetime in hours (defaults to the configured expiry)
    #[arg(long)]
    expiry_hours: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut security = SecurityConfig::from_env(&Environment::from_env())?;
    if let Some(hours) = cli.expiry_hours {
        security.jwt_expiry_hours = hours;
    }

    let claims = Claims::new(cli.user_id, &security);
    let token = generate_token(&security.jwt_secret, &claims)?;

    println!("{}", token);
    Ok(())
}
