use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

mod countdown;
mod show;
mod terminal;

use clap::ArgAction;
use countdown::Countdown;
use show::Show;
use tracing::instrument;
use wedcard::{Config, Resolver, RouteParams, WeddingPage, page::SystemClock};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = "wedcard.toml", global = true)]
    config: PathBuf,

    /// Base URL of the backend (overrides the configuration file)
    #[arg(long, env = "WEDCARD_BACKEND_URL", global = true)]
    backend_url: Option<String>,

    /// Directory holding the local registry (overrides the configuration file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = self.load_config()?;
        self.command
            .unwrap_or_else(|| Command::Show(Show::default()))
            .run(config, &self.config)
            .await
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load_or_default(&self.config).map_err(anyhow::Error::msg)?;
        if let Some(url) = &self.backend_url {
            config.set_backend_url(url.clone());
        }
        if let Some(dir) = &self.data_dir {
            config.set_data_dir(dir.clone());
        }
        Ok(config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Resolve a wedding page and print it (default)
    Show(Show),

    /// Resolve a wedding page and follow its countdown
    Countdown(Countdown),

    /// Show the effective configuration
    Config(ShowConfig),
}

impl Command {
    async fn run(self, config: Config, config_path: &Path) -> anyhow::Result<()> {
        match self {
            Self::Show(command) => command.run(&config).await?,
            Self::Countdown(command) => command.run(&config).await?,
            Self::Config(command) => command.run(&config, config_path)?,
        }
        Ok(())
    }
}

/// Which page to open.
///
/// A bare path segment is treated like the catch-all route: as a slug.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct Target {
    /// The public page path, e.g. `sarah-michael`
    path: Option<String>,

    /// The custom slug of the page
    #[arg(long)]
    slug: Option<String>,

    /// The owner id of the page
    #[arg(long)]
    owner: Option<String>,
}

impl Target {
    fn route(&self) -> RouteParams {
        RouteParams {
            custom_url: self.slug.clone(),
            catch_all: self.path.clone(),
            wedding_id: self.owner.clone(),
        }
    }
}

/// Mounts a page and resolves the target into it.
async fn open_page(config: &Config, target: &Target) -> anyhow::Result<WeddingPage> {
    let resolver = Resolver::from_config(config)?;
    let mut page = WeddingPage::new(resolver, Arc::new(SystemClock));
    let state = page.navigate(target.route()).await;
    tracing::debug!("Page is {state}");
    Ok(page)
}

#[derive(Debug, clap::Parser)]
pub struct ShowConfig {
    /// Write the effective configuration to the configuration file
    #[arg(long)]
    save: bool,
}

impl ShowConfig {
    #[instrument(level = "debug", skip(self, config))]
    fn run(self, config: &Config, path: &Path) -> anyhow::Result<()> {
        if self.save {
            config.save(path).map_err(anyhow::Error::msg)?;
            println!("Saved configuration to {}", path.display());
            return Ok(());
        }

        print!("{}", toml::to_string_pretty(config)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use serde_json::json;
    use tempfile::TempDir;
    use wedcard::{PageState, Provenance, storage::USERS_KEY};

    use super::*;

    /// A base URL nothing is listening on.
    fn dead_backend() -> String {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        format!("http://127.0.0.1:{port}")
    }

    fn config_with_registry(tmp: &TempDir) -> Config {
        std::fs::write(
            tmp.path().join(format!("{USERS_KEY}.json")),
            json!({"u1": {"username": "sarah"}}).to_string(),
        )
        .unwrap();
        std::fs::write(
            tmp.path().join("wedding_data_u1.json"),
            json!({"custom_url": "sarah-michael", "couple_name_1": "Sarah J."}).to_string(),
        )
        .unwrap();

        let mut config = Config::default();
        config.set_backend_url(dead_backend());
        config.set_data_dir(tmp.path().to_path_buf());
        config
    }

    #[test]
    fn bare_path_is_a_slug() {
        let target = Target {
            path: Some("sarah-michael".to_string()),
            ..Target::default()
        };
        let key = target.route().lookup_key().unwrap();
        assert_eq!(key.kind(), wedcard::domain::KeyKind::Slug);
    }

    #[tokio::test]
    async fn open_page_falls_back_to_local_registry() {
        let tmp = TempDir::new().unwrap();
        let config = config_with_registry(&tmp);
        let target = Target {
            path: Some("sarah-michael".to_string()),
            ..Target::default()
        };

        let page = open_page(&config, &target).await.unwrap();

        assert_eq!(page.state(), &PageState::Ready);
        assert_eq!(page.model().provenance(), Some(Provenance::LocalRegistry));
        assert_eq!(page.record().unwrap().couple_name_1, "Sarah J.");
    }

    #[tokio::test]
    async fn open_page_without_target_shows_baseline() {
        let tmp = TempDir::new().unwrap();
        let config = config_with_registry(&tmp);

        let page = open_page(&config, &Target::default()).await.unwrap();

        assert_eq!(page.model().provenance(), Some(Provenance::Baseline));
        assert_eq!(page.record().unwrap().couple_name_1, "Sarah");
    }

    #[test]
    fn config_save_writes_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wedcard.toml");
        let config = config_with_registry(&tmp);

        ShowConfig { save: true }.run(&config, &path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
