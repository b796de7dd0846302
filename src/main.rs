use anyhow::Result;
use clap::Parser;
mod auth;
mod ui;
use qrdecrypt::SealedMessage;

const CIPHERTEXT_PROMPT: &str = "first base64_decode parameter from the QR code (ciphertext)";
const SALT_PROMPT: &str = "second base64_decode parameter from the QR code (salt)";
const IV_PROMPT: &str = "third base64_decode parameter from the QR code (iv)";

#[derive(Debug, Parser)]
#[command(name = "qrdecrypt")]
#[command(
    version,
    about = "Decrypts a password-protected QR code message (PBKDF2-HMAC-SHA512, AES-256-CBC).",
    long_about = "Decrypts a password-protected QR code message (PBKDF2-HMAC-SHA512, AES-256-CBC).\n\n\
                  Fields not given as options are prompted for in order: ciphertext, salt, iv. \
                  The password is read from QRDECRYPT_PASSWORD, the first line of piped stdin, \
                  or a hidden prompt."
)]
struct Cli {
    /// Full decryption command scanned from the QR code
    #[arg(
        long,
        value_name = "TEXT",
        env = "QRDECRYPT_PAYLOAD",
        conflicts_with_all = ["ciphertext", "salt", "iv"]
    )]
    payload: Option<String>,

    /// Base64-encoded ciphertext (first base64_decode parameter)
    #[arg(long, value_name = "BASE64", env = "QRDECRYPT_CIPHERTEXT")]
    ciphertext: Option<String>,

    /// Base64-encoded salt (second base64_decode parameter)
    #[arg(long, value_name = "BASE64", env = "QRDECRYPT_SALT")]
    salt: Option<String>,

    /// Base64-encoded iv (third base64_decode parameter)
    #[arg(long, value_name = "BASE64", env = "QRDECRYPT_IV")]
    iv: Option<String>,
}

fn field(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => auth::read_field(prompt),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let password = auth::read_password()?;

    let message = match args.payload {
        Some(payload) => SealedMessage::from_payload(&payload)?,
        None => {
            let ciphertext = field(args.ciphertext, CIPHERTEXT_PROMPT)?;
            let salt = field(args.salt, SALT_PROMPT)?;
            let iv = field(args.iv, IV_PROMPT)?;
            SealedMessage::from_base64(&ciphertext, &salt, &iv)?
        }
    };

    let spinner = ui::Spinner::new("Deriving key");
    spinner.start();
    let plaintext = message.open(&password)?;
    spinner.finish();
    drop(password);

    println!("{}", plaintext.as_str());

    Ok(())
}
