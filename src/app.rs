use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use saltline::config::{APP_NAME, DEFAULT_MEMORY_COST, DEFAULT_OUTPUT_LEN, DEFAULT_SALT_LEN, DEFAULT_THREADS, DEFAULT_TIME_COST};
use saltline::{Argon2Engine, Base64, HashParameters, Hasher, Hex, Limits, TextEncoding, Variant, Version, generate_salt};
use tracing::{Level, debug};

use crate::secret::Password;
use crate::ui::display::{show_credential, show_limits, show_match};
use crate::ui::prompt::{prompt_hash_password, prompt_verify_password};

/// Text encoding of salt and digest inside a credential.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Encoding {
    #[default]
    Base64,
    Hex,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash a password and print its credential.
    Hash {
        /// Password (prompted for when omitted).
        #[arg(long)]
        password: Option<String>,

        /// Salt (random when omitted).
        #[arg(short, long)]
        salt: Option<String>,

        /// Time cost: number of passes over memory.
        #[arg(short, long, default_value_t = DEFAULT_TIME_COST)]
        time: u32,

        /// Memory cost in KiB.
        #[arg(short, long, default_value_t = DEFAULT_MEMORY_COST)]
        memory: u32,

        /// Degree of parallelism.
        #[arg(short = 'p', long, default_value_t = DEFAULT_THREADS)]
        threads: u32,

        /// Digest length in bytes.
        #[arg(short, long, default_value_t = DEFAULT_OUTPUT_LEN)]
        length: usize,

        /// Argon2 variant (argon2i or argon2id).
        #[arg(long, default_value_t = Variant::Argon2id)]
        variant: Variant,

        /// Encoding of salt and digest.
        #[arg(short, long, value_enum, default_value_t)]
        encoding: Encoding,
    },

    /// Verify a password against a credential.
    Verify {
        /// Credential produced by `hash`.
        #[arg(short, long)]
        credential: String,

        /// Password (prompted for when omitted).
        #[arg(long)]
        password: Option<String>,

        /// Expected Argon2 variant.
        #[arg(long, default_value_t = Variant::Argon2id)]
        variant: Variant,

        /// Encoding of salt and digest.
        #[arg(short, long, value_enum, default_value_t)]
        encoding: Encoding,
    },

    /// Show the parameter limits of this platform.
    Limits,
}

#[derive(Parser)]
#[command(name = APP_NAME, version, about = "Hash and verify passwords with Argon2 credentials.")]
pub struct App {
    /// Log every verification stage.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl App {
    pub fn init() -> Result<Self> {
        let app = Self::parse();

        let level = if app.verbose { Level::DEBUG } else { Level::INFO };
        let subscriber = tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).with_file(true).with_line_number(true).finish();
        tracing::subscriber::set_global_default(subscriber)?;

        Ok(app)
    }

    pub fn execute(self) -> Result<()> {
        // Computed once; every hasher below shares it.
        let limits = Limits::native();

        match self.command {
            Commands::Hash { password, salt, time, memory, threads, length, variant, encoding } => {
                let password = Self::password_or_prompt(password, prompt_hash_password)?;
                let salt = salt.map_or_else(|| generate_salt::<DEFAULT_SALT_LEN>().to_vec(), String::into_bytes);

                let params = HashParameters {
                    password: password.as_bytes(),
                    salt: &salt,
                    output_len: length,
                    time_cost: time,
                    memory_cost: memory,
                    threads,
                    version: Version::V0x13,
                    variant,
                };

                let credential = match encoding {
                    Encoding::Base64 => Self::hash::<Base64>(&params, limits),
                    Encoding::Hex => Self::hash::<Hex>(&params, limits),
                }?;

                show_credential(&credential);
                Ok(())
            }
            Commands::Verify { credential, password, variant, encoding } => {
                let password = Self::password_or_prompt(password, prompt_verify_password)?;

                match encoding {
                    Encoding::Base64 => Self::verify::<Base64>(&credential, &password, variant, limits),
                    Encoding::Hex => Self::verify::<Hex>(&credential, &password, variant, limits),
                }?;

                show_match();
                Ok(())
            }
            Commands::Limits => {
                show_limits(&limits);
                Ok(())
            }
        }
    }

    fn password_or_prompt(password: Option<String>, prompt: fn() -> Result<Password>) -> Result<Password> {
        password.map_or_else(prompt, |password| Ok(Password::from_string(password)))
    }

    fn hash<E: TextEncoding>(params: &HashParameters<'_>, limits: Limits) -> Result<String> {
        Hasher::<Argon2Engine, E>::with_engine(Argon2Engine, limits).hash(params).context("hashing failed")
    }

    fn verify<E: TextEncoding>(credential: &str, password: &Password, variant: Variant, limits: Limits) -> Result<()> {
        let hasher = Hasher::<Argon2Engine, E>::with_engine(Argon2Engine, limits);

        match hasher.verify(credential, password.as_bytes(), variant) {
            Ok(()) => Ok(()),
            Err(e) if e.is_mismatch() => bail!("invalid credentials"),
            Err(e) => {
                // The cause is logged for operators; the user only learns that
                // the record is unusable.
                debug!(error = %e, "verification aborted");
                bail!("cannot verify credential")
            }
        }
    }
}
