//! The `generate` command.

use std::io::{self, Write};

use anyhow::Context;
use passgen::{
    CategorySet, CharacterCategory, GenerationRequest, GeneratorConfig, PasswordGenerator, Secret,
};
use zeroize::Zeroizing;

use crate::ProgError;

pub(crate) struct Options {
    pub(crate) length: Option<usize>,
    pub(crate) categories: Option<Vec<CharacterCategory>>,
    pub(crate) count: usize,
    pub(crate) copy: bool,
}

pub(crate) fn generate(config: &GeneratorConfig, options: Options) -> Result<(), ProgError> {
    if options.count == 0 {
        return Err(ProgError::ZeroCount);
    }
    let request = build_request(config, &options);
    let bounds = config.bounds().map_err(passgen::ConfigError::from)?;

    let mut generator = PasswordGenerator::from_os_rng(bounds)?;
    let passwords = (0..options.count)
        .map(|_| generator.generate(&request))
        .collect::<Result<Vec<Secret>, _>>()?;

    // Newline-separated, with a trailing newline; same as what gets printed.
    let mut output = Zeroizing::new(String::new());
    for password in passwords.iter() {
        output.push_str(password.as_str());
        output.push('\n');
    }

    if options.copy {
        crate::clipboard::send_to_clipboard(output.trim_end().as_bytes())
            .map_err(ProgError::Clipboard)?;
        if passwords.len() == 1 {
            eprintln!("Password copied to the clipboard.");
        } else {
            eprintln!("{} passwords copied to the clipboard.", passwords.len());
        }
    } else {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(output.as_bytes())
            .and_then(|()| stdout.flush())
            .context("failed to write passwords to stdout")?;
    }
    Ok(())
}

/// Command line values win over configured ones.
fn build_request(config: &GeneratorConfig, options: &Options) -> GenerationRequest {
    let mut request = config.request();
    if let Some(length) = options.length {
        request.length = length;
    }
    if let Some(categories) = options.categories.as_ref() {
        request.categories = categories.iter().copied().collect::<CategorySet>();
    }
    request
}
