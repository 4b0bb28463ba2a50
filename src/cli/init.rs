//! Init command implementation
//!
//! Writes a starter `lifeware.toml`, `.env.example` and `.gitignore`.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug)]
pub enum InitResult {
    Success,
    /// lifeware.toml exists and `--force` was not given
    AlreadyExists,
    Error(String),
}

/// Options for the init command
pub struct InitConfig {
    pub path: PathBuf,
    pub force: bool,
    /// `openai` or `groq`
    pub provider: String,
    pub host: String,
    pub port: u16,
}

pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Lifeware");

    let provider = config.provider.to_lowercase();
    if provider != "openai" && provider != "groq" {
        let message = format!(
            "Unknown provider '{}', expected 'openai' or 'groq'",
            config.provider
        );
        output.error(&message);
        return InitResult::Error(message);
    }

    let base_path = &config.path;
    let config_path = base_path.join("lifeware.toml");
    if config_path.exists() && !config.force {
        output.warning("lifeware.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if let Err(e) = fs::create_dir_all(base_path) {
        output.error(&format!("Failed to create {}: {}", base_path.display(), e));
        return InitResult::Error(e.to_string());
    }

    let files = [
        ("lifeware.toml", generate_lifeware_toml(&config), true),
        (".env.example", generate_env_example(&provider), true),
        (".gitignore", generate_gitignore(), false),
    ];

    for (name, content, overwrite_with_force) in files {
        let path = base_path.join(name);
        match write_file(&path, &content, config.force && overwrite_with_force) {
            Ok(true) => output.created(name),
            Ok(false) => output.skipped(name, "already exists"),
            Err(e) => {
                output.error(&format!("Failed to create {}: {}", name, e));
                return InitResult::Error(e.to_string());
            }
        }
    }

    output.success("Lifeware configuration created");

    output.header("Next Steps");
    output.info("1. Copy the environment template and fill in your keys:");
    output.command("cp .env.example .env");
    output.info("2. Start the server:");
    output.command("lifeware-server");
    output.hint(&format!(
        "Without Supabase credentials the directory runs on demo data at http://{}:{}",
        config.host, config.port
    ));

    InitResult::Success
}

/// Returns whether the file was written
fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    fs::write(path, content)?;
    Ok(true)
}

fn generate_lifeware_toml(config: &InitConfig) -> String {
    let assistant = if config.provider.eq_ignore_ascii_case("groq") {
        r#"[assistant]
provider = "groq"
api_key_env = "GROQ_API_KEY"
model = "llama-3.1-8b-instant"
"#
    } else {
        r#"[assistant]
provider = "openai"
api_key_env = "OPENAI_API_KEY"
model = "gpt-3.5-turbo"
"#
    };

    format!(
        r#"# Lifeware Collective configuration
#
# Secrets are never stored here: each *_env key names the environment
# variable that holds the value (see .env.example).

[server]
host = "{host}"
port = {port}
log_level = "info"
# "pretty" or "json"
log_format = "pretty"
ui_dir = "ui/dist"
# Extra origins allowed to call the API (e.g. a `trunk serve` dev server)
allowed_origins = []

[server.rate_limit]
enabled = true
chat_period_secs = 2
chat_burst = 5

[database]
supabase_url_env = "SUPABASE_URL"
supabase_key_env = "SUPABASE_KEY"
donor_table = "donors"
timeout_secs = 10

{assistant}max_tokens = 500
temperature = 0.7
max_history_turns = 10
timeout_secs = 30
"#,
        host = config.host,
        port = config.port,
        assistant = assistant,
    )
}

fn generate_env_example(provider: &str) -> String {
    let key_line = if provider == "groq" {
        "GROQ_API_KEY="
    } else {
        "OPENAI_API_KEY="
    };

    format!(
        r#"# Supabase project (Settings -> API). Leave empty to run on demo data.
SUPABASE_URL=
SUPABASE_KEY=

# Health assistant. Leave empty and the assistant replies with a fallback message.
{key_line}

# Log filter override, e.g. lifeware=debug,tower_http=debug
RUST_LOG=
"#,
        key_line = key_line
    )
}

fn generate_gitignore() -> String {
    r#"/target/
/ui/dist/
.env
.DS_Store
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::toml_config::{LifewareConfig, ProviderKind};
    use tempfile::TempDir;

    fn init_config(path: &Path, provider: &str) -> InitConfig {
        InitConfig {
            path: path.to_path_buf(),
            force: false,
            provider: provider.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }

    #[test]
    fn test_generated_toml_parses_and_validates() {
        let config = InitConfig {
            port: 8080,
            host: "0.0.0.0".to_string(),
            ..init_config(Path::new("/tmp"), "openai")
        };
        let parsed: LifewareConfig = toml::from_str(&generate_lifeware_toml(&config)).unwrap();

        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.server.host, "0.0.0.0");
        assert_eq!(parsed.assistant.provider, ProviderKind::OpenAI);
        assert_eq!(parsed.database.donor_table, "donors");
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_generated_toml_groq() {
        let config = init_config(Path::new("/tmp"), "groq");
        let parsed: LifewareConfig = toml::from_str(&generate_lifeware_toml(&config)).unwrap();

        assert_eq!(parsed.assistant.provider, ProviderKind::Groq);
        assert_eq!(parsed.assistant.api_key_env, "GROQ_API_KEY");
    }

    #[test]
    fn test_env_example_names_every_secret() {
        let content = generate_env_example("openai");
        assert!(content.contains("SUPABASE_URL="));
        assert!(content.contains("SUPABASE_KEY="));
        assert!(content.contains("OPENAI_API_KEY="));
        assert!(generate_env_example("groq").contains("GROQ_API_KEY="));
    }

    #[test]
    fn test_gitignore_excludes_env() {
        let content = generate_gitignore();
        assert!(content.contains(".env"));
        assert!(content.contains("/target/"));
    }

    #[test]
    fn test_run_creates_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = run(init_config(temp_dir.path(), "openai"), &Output::no_color());

        assert!(matches!(result, InitResult::Success));
        assert!(temp_dir.path().join("lifeware.toml").exists());
        assert!(temp_dir.path().join(".env.example").exists());
        assert!(temp_dir.path().join(".gitignore").exists());
    }

    #[test]
    fn test_run_refuses_to_overwrite_without_force() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("lifeware.toml"), "# mine").unwrap();

        let result = run(init_config(temp_dir.path(), "openai"), &Output::no_color());
        assert!(matches!(result, InitResult::AlreadyExists));
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("lifeware.toml")).unwrap(),
            "# mine"
        );
    }

    #[test]
    fn test_force_keeps_existing_gitignore() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("lifeware.toml"), "# mine").unwrap();
        fs::write(temp_dir.path().join(".gitignore"), "custom\n").unwrap();

        let config = InitConfig {
            force: true,
            ..init_config(temp_dir.path(), "groq")
        };
        assert!(matches!(run(config, &Output::no_color()), InitResult::Success));

        let toml = fs::read_to_string(temp_dir.path().join("lifeware.toml")).unwrap();
        assert!(toml.contains("provider = \"groq\""));
        assert_eq!(
            fs::read_to_string(temp_dir.path().join(".gitignore")).unwrap(),
            "custom\n"
        );
    }

    #[test]
    fn test_unknown_provider_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = run(init_config(temp_dir.path(), "ollama"), &Output::no_color());

        assert!(matches!(result, InitResult::Error(_)));
        assert!(!temp_dir.path().join("lifeware.toml").exists());
    }
}
