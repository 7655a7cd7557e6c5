//! Password hash helper
//!
//! Prints the Argon2id PHC string for a password so an admin credential can
//! be seeded by hand:
//!
//! ```text
//! hash-password 'new password'
//! echo 'new password' | hash-password
//! ```

use std::io::{self, BufRead};

use anyhow::Context;
use platform::password::{ClearTextPassword, PasswordHasher};

fn main() -> anyhow::Result<()> {
    let raw = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let password = ClearTextPassword::new(raw).context("Password rejected")?;
    let hash = PasswordHasher::new()?.hash(&password)?;

    println!("{}", hash.as_phc_string());
    Ok(())
}
