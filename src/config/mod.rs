use std::env;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; PageInfoBot/1.0; +https://github.com/page-info/page-info-server)";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// `APP_ENV` is anything other than `production`.
    pub is_dev: bool,
    pub user_agent: String,
    pub page_route: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenvy::dotenv().ok();

        let page_route = env::var("PAGE_ROUTE").unwrap_or_else(|_| "/page".to_string());
        let page_route = if page_route.starts_with('/') {
            page_route
        } else {
            format!("/{page_route}")
        };

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            is_dev: env::var("APP_ENV").as_deref() != Ok("production"),
            user_agent: env::var("FETCH_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            page_route,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
