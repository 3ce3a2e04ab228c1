//! `scdl resolve <reference>` – print the direct media URL.

use anyhow::{bail, Result};
use scdl_core::{Session, Transport};

pub fn run_resolve<T: Transport>(session: &mut Session<T>, reference: &str) -> Result<()> {
    match session.resolve(reference)? {
        Some(url) => {
            println!("{}", url);
            Ok(())
        }
        None => bail!("{} did not redirect to a media URL", reference),
    }
}
