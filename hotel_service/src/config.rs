/// The deployment environment this binary believes it is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Develop,
    Production,
}

impl Environment {
    /// Reads `ENVIRONMENT`, defaulting to production so a missing variable
    /// never produces chatty local behavior on a real deployment.
    pub fn new_or_prod() -> Self {
        match std::env::var("ENVIRONMENT").as_deref() {
            Ok("local") => Environment::Local,
            Ok("develop") => Environment::Develop,
            _ => Environment::Production,
        }
    }
}

/// Configuration parameters for the application.
#[derive(Debug)]
pub struct Config {
    /// The connection URL for the hotel Postgres database.
    pub database_url: String,
    /// The port to listen for HTTP requests on.
    pub port: usize,
    /// The environment we are in.
    pub environment: Environment,
    /// HS256 secret shared with the identity provider.
    pub jwt_secret: String,
    /// Expected `aud` claim on access tokens.
    pub jwt_audience: String,
    /// Expected `iss` claim on access tokens.
    pub jwt_issuer: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be provided");
        let port: usize = std::env::var("PORT")
            .unwrap_or("8080".to_string())
            .parse::<usize>()
            .unwrap();
        let environment = Environment::new_or_prod();
        let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be provided");
        let jwt_audience = std::env::var("JWT_AUDIENCE").expect("JWT_AUDIENCE must be provided");
        let jwt_issuer = std::env::var("JWT_ISSUER").expect("JWT_ISSUER must be provided");

        Ok(Config {
            database_url,
            port,
            environment,
            jwt_secret,
            jwt_audience,
            jwt_issuer,
        })
    }
}
