//! Keygen command implementation.

use crate::cli::KeygenArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use flashpaper_cipher::SnippetCipher;
use std::path::Path;

/// Execute the keygen command.
///
/// With `--save` the key is written into the config file at `config_path`.
pub fn execute_keygen(
    args: KeygenArgs,
    config: &mut Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let key = SnippetCipher::generate_key_hex();

    if args.save {
        config.encryption_key = Some(key);
        config.save_to(config_path)?;
        println!(
            "{}",
            formatter.success(&format!("Key saved to {}", config_path.display()))
        );
    } else {
        println!("{}", key);
    }

    Ok(())
}
