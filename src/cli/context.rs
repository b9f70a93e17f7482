use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use tokio::runtime::Runtime;

use bytebank_config::{Config, ConfigManager};
use bytebank_core::{
    AccountService, CoreError, RegistrationService, Session, StorageService,
};
use bytebank_storage_json::JsonFileStore;

use crate::cli::commands::{all_definitions, CommandDefinition, CommandRegistry};
use crate::cli::error::{CliError, CommandError};
use crate::cli::output;

const HOME_ENV: &str = "BYTEBANK_HOME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    mode: CliMode,
    session: Session,
    config: Config,
    config_manager: ConfigManager,
    runtime: Runtime,
    theme: ColorfulTheme,
    registry: CommandRegistry,
    pub(crate) running: bool,
    pub(crate) last_command: Option<String>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, base_dir())
    }

    /// Builds the shell over `<base>/config` and `<base>/data`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let (config, created) = config_manager.load_or_init()?;
        if created {
            tracing::info!(path = %config_manager.config_path().display(), "wrote default config");
        }

        let storage_root = config
            .storage_root
            .clone()
            .unwrap_or_else(|| base.join("data"));
        let store = JsonFileStore::new(storage_root)?;
        let accounts = AccountService::new(StorageService::new(Box::new(store)))
            .with_key(config.account_key.clone());
        let session = Session::new(accounts)
            .with_registration(RegistrationService::with_delay(config.registration_delay()))
            .with_balance_visible_on_login(config.show_balance_on_login);

        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            mode,
            session,
            config,
            config_manager,
            runtime,
            theme: ColorfulTheme::default(),
            registry: CommandRegistry::new(all_definitions()),
            running: true,
            last_command: None,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub(crate) fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn config_path(&self) -> PathBuf {
        self.config_manager.config_path().to_path_buf()
    }

    pub(crate) fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub(crate) fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    /// Every word the shell answers to, aliases included.
    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.words().collect()
    }

    /// Dialoguer prompts only make sense on a terminal.
    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn prompt(&self) -> String {
        match self.session.current_user() {
            Some(user) => format!("bytebank({})> ", user.name),
            None => "bytebank> ".to_string(),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|definition| definition.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            output::info(format!("Did you mean `{}`?", best));
        }
    }

    fn closest_command(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.registry
            .words()
            .map(|name| (levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        match self.confirm("Exit Bytebank?") {
            Ok(answer) => Ok(answer),
            Err(err) => {
                tracing::warn!(error = %err, "exit prompt failed");
                Ok(true)
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::Usage(usage) => {
                output::error(format!("Usage: {}", usage));
                output::info("Use `help <command>` for details.");
            }
            CommandError::Core(CoreError::NotLoggedIn) => {
                output::error("You are not logged in.");
                output::info("Try `login <email> <password>` first.");
            }
            CommandError::Form(errors) => {
                for field in &errors.errors {
                    output::error(field.message);
                }
            }
            other => {
                tracing::debug!(command = ?self.last_command, error = ?other, "command failed");
                output::error(other);
            }
        }
        Ok(())
    }
}

fn base_dir() -> PathBuf {
    std::env::var_os(HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| Config::default().resolve_storage_root())
}
