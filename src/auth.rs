use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal, Write};
use zeroize::Zeroizing;

pub const PASSWORD_ENV: &str = "QRDECRYPT_PASSWORD";

pub fn read_password() -> Result<Zeroizing<String>> {
    //  Environment Variable
    //  QRDECRYPT_PASSWORD="supersecret" qrdecrypt --payload "$(zbarimg -q --raw code.png)"
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    //  stdin (Pipeline), one value per line: password, ciphertext, salt, iv
    //  printf '%s\n' "$PW" "$CT" "$SALT" "$IV" | qrdecrypt
    if !io::stdin().is_terminal() {
        let mut pw = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut pw)?;
        trim_newline(&mut pw);

        if !pw.is_empty() {
            return Ok(pw);
        }
    }

    //  Interactive (TTY), input is not echoed
    if io::stdin().is_terminal() {
        let pw = Zeroizing::new(rpassword::prompt_password("Password: ")?);
        if !pw.is_empty() {
            return Ok(pw);
        }
    }

    bail!("No password provided")
}

/// Prompts on stderr and reads one line from stdin.
pub fn read_field(prompt: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}: ")?;
    stderr.flush()?;

    let mut value = String::new();
    if io::stdin().lock().read_line(&mut value)? == 0 {
        bail!("input ended before the {prompt} was entered");
    }
    trim_newline(&mut value);

    Ok(value)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
