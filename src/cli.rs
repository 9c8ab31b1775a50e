//! Command-line front end.

use std::io::Write;
use std::path::PathBuf;

use chrono::Datelike;
use clap::{
    Parser,
    Subcommand,
};
use thiserror::Error;

use crate::config::{
    ConfigError,
    ConfigManager,
};
use crate::contact::{
    ContactForm,
    Field,
    HttpSubmitter,
    SubmitError,
    SubmitOutcome,
};
use crate::input::catalog::{
    Catalog,
    CatalogError,
};
use crate::language::{
    Language,
    UnsupportedLanguage,
};
use crate::preference::{
    FileStore,
    PreferenceError,
};
use crate::resolver::{
    ResolveOptions,
    Resolution,
    Translator,
};
use crate::sections::{
    Contact,
    Page,
};
use crate::selection::LanguageSelection;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "portfolio", version, about = "Bilingual résumé site content")]
pub struct Cli {
    /// Site root holding `.portfolio.json`
    #[arg(long, global = true, env = "PORTFOLIO_ROOT")]
    pub root: Option<PathBuf>,

    /// Language for this run only; the stored preference is left untouched
    #[arg(long, global = true)]
    pub lang: Option<Language>,

    /// Write logs to `<DIR>/portfolio.log` instead of stderr
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every section of the page
    Render,

    /// Resolve one translation key
    Lookup {
        key: String,

        /// Print lists and objects as JSON
        #[arg(long)]
        structured: bool,
    },

    /// List translation keys, optionally under a prefix
    Keys { prefix: Option<String> },

    /// Switch language and remember the choice
    SetLanguage { code: String },

    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

/// Errors that end a command with a non-zero exit code.
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid or unreadable `.portfolio.json`.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Translation catalogs could not be loaded or are out of sync.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// No place to store the language preference.
    #[error(transparent)]
    Preference(#[from] PreferenceError),

    /// The contact endpoint is unusable.
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// `set-language` was given an unsupported code.
    #[error(transparent)]
    Language(#[from] UnsupportedLanguage),

    /// Some form fields were rejected; the messages have been printed.
    #[error("Contact form is invalid")]
    InvalidForm,

    /// The relay did not accept the message. Carries the alert shown to the user.
    #[error("{0}")]
    ContactFailed(String),

    /// Output could not be written.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Structured output could not be encoded as JSON.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Everything a command needs, loaded once per run.
struct Site {
    /// Validated settings and the site root.
    config: ConfigManager,
    /// Catalogs in use for this run.
    catalog: Catalog,
    /// Where the language preference lives.
    store: FileStore,
    /// Active language, already activated against `store`.
    selection: LanguageSelection,
}

impl Site {
    /// Load settings, catalogs and the stored language for `root`.
    fn load(root: Option<PathBuf>) -> Result<Self, CliError> {
        let mut config = ConfigManager::new();
        config.load_settings(root)?;
        let settings = config.get_settings();

        let catalog = match &settings.locales_dir {
            Some(dir) => Catalog::load_dir(&config.resolve_path(dir))?,
            None => Catalog::embedded()?,
        };
        if let Err(e) = catalog.check_parity(&settings.key_separator) {
            if settings.strict_catalogs {
                return Err(e.into());
            }
            tracing::warn!("{}", e);
        }

        let preference_file = settings.preference_file.as_deref().map(|p| config.resolve_path(p));
        let store = FileStore::open_default(preference_file)?;

        let mut selection = LanguageSelection::new(settings.default_language);
        if selection.activate(&store) {
            tracing::debug!("Applied stored language: {}", selection.current());
        }

        Ok(Self { config, catalog, store, selection })
    }

    /// Switcher label of `language`, in the current language.
    fn switcher_label(&self, language: Language) -> String {
        self.selection.translator(&self.catalog).t(language.switcher_key()).into_owned()
    }
}

/// Run one command, writing its output to `out`.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let mut site = Site::load(cli.root)?;
    let language = cli.lang.unwrap_or_else(|| site.selection.current());
    let settings = site.config.get_settings();
    let translator = Translator::new(&site.catalog, language)
        .with_separator(&settings.key_separator);

    match cli.command {
        Command::Render => {
            let year = chrono::Local::now().year();
            writeln!(out, "{}", Page::build(&translator, settings, year))?;
        }
        Command::Lookup { key, structured } => {
            let options = ResolveOptions { return_structured: structured };
            match translator.resolve(&key, options) {
                Resolution::Structured(value) => {
                    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
                }
                resolution => writeln!(out, "{}", resolution.display())?,
            }
        }
        Command::Keys { prefix } => {
            let keys =
                site.catalog.key_paths(language, &settings.key_separator, prefix.as_deref());
            for key in keys {
                writeln!(out, "{key}")?;
            }
        }
        Command::SetLanguage { code } => {
            let language: Language = code.parse()?;
            site.selection.set_language(language, &mut site.store);
            writeln!(out, "{}", site.switcher_label(language))?;
        }
        Command::Contact { name, email, message } => {
            let submitter = HttpSubmitter::new(&settings.contact.endpoint)?;
            let mut form = ContactForm::new();
            form.set_field(Field::Name, name);
            form.set_field(Field::Email, email);
            form.set_field(Field::Message, message);

            match form.submit(&translator, &submitter).await {
                SubmitOutcome::Sent => {
                    let texts = Contact::build(&translator, &settings.contact.whatsapp_url);
                    writeln!(out, "{}", texts.success)?;
                    writeln!(out, "{}", texts.thanks)?;
                }
                SubmitOutcome::Invalid => {
                    for field in Field::ALL {
                        if let Some(error) = form.error(field) {
                            writeln!(out, "{error}")?;
                        }
                    }
                    return Err(CliError::InvalidForm);
                }
                SubmitOutcome::Failed(alert) => return Err(CliError::ContactFailed(alert)),
                SubmitOutcome::Ignored => {}
            }
        }
    }

    Ok(())
}
