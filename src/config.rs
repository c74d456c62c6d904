use std::path::Path;
use std::fs;
use std::io::{self, Write};
use serde::{Deserialize, Serialize};
use crate::logging::LogLevel;

pub const BOT_NAME: &str = "KozyDot's Beatmap Downloader";
pub const BOT_VERSION: &str = "v1.0.0";

pub const API_BASE_URL: &str = "https://catboy.best";

pub const COMMAND_PREFIX: &str = "!bm";

/// Requests allowed per user per window.
pub const RATE_LIMIT: u32 = 5;
pub const RATE_LIMIT_WINDOW: std::time::Duration = std::time::Duration::from_secs(60);

pub const SEARCH_LIMIT: u32 = 10;
/// Ranked, approved, loved.
pub const VALID_STATUSES: [i8; 3] = [1, 2, 4];

pub const EMBED_COLOR: u32 = 0xFF66AA;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub discord_token: Option<String>,
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Config {
    const CONFIG_PATH: &'static str = "kozybeat.conf";

    pub fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut config = if Path::new(Self::CONFIG_PATH).exists() {
            toml::from_str::<Config>(&fs::read_to_string(Self::CONFIG_PATH)?)?
        } else {
            Self::initial_setup()?
        };

        // The environment always wins over the config file.
        if let Ok(token) = std::env::var("DISCORD_TOKEN") {
            if !token.trim().is_empty() {
                config.discord_token = Some(token.trim().to_string());
            }
        }

        if config.discord_token.is_none() {
            config.discord_token = Some(Self::prompt_input("Enter your Discord Bot Token: ")?);
            config.save()?;
        }

        Ok(config)
    }

    fn initial_setup() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        println!("Welcome to {}! Let's set up your configuration.", BOT_NAME);

        println!("\nFirst, you'll need a Discord bot token.");
        println!("Please follow these steps:");
        println!("1. Go to https://discord.com/developers/applications");
        println!("2. Click on 'New Application' and give it a name");
        println!("3. After creating, go to the 'Bot' tab and click 'Add Bot'");
        println!("4. Click on 'Reset Token' to generate a new token, then copy it");
        println!("5. Under 'Privileged Gateway Intents', enable 'Message Content Intent'");
        println!("6. Go to the 'OAuth2' tab, then 'URL Generator'");
        println!("7. Select the 'bot' scope and the 'Send Messages' and 'Embed Links' permissions");
        println!("8. Copy the generated URL and use it to invite the bot to your server");
        println!("\nPress Enter when you're ready to continue...");
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;

        let discord_token = Self::prompt_input("Enter your Discord Bot Token (leave empty to use the DISCORD_TOKEN environment variable): ")?;

        let config = Config {
            discord_token: if discord_token.is_empty() { None } else { Some(discord_token) },
            log_level: LogLevel::default(),
        };

        config.save()?;
        println!("Configuration saved successfully!");

        Ok(config)
    }

    fn prompt_input(prompt: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let toml = toml::to_string(self)?;
        fs::write(Self::CONFIG_PATH, toml)?;
        Ok(())
    }

    pub fn is_discord_configured(&self) -> bool {
        self.discord_token.is_some()
    }
}
