//! Walkthrough: exchange an encrypted message between two keypairs.
//!
//! Fully offline. Run with: cargo run --example secure_message

use whisperchain::messaging::{generate_keypair, hash, Messenger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let alice = generate_keypair();
    let bob = generate_keypair();
    println!("Alice public key: {}", alice.public.to_base64());
    println!("Bob public key:   {}", bob.public.to_base64());

    let messenger = Messenger::new(Default::default());

    // Alice encrypts to Bob, with a one-hour expiry.
    let record = messenger.encrypt_message(
        b"the contract deploys at dawn",
        &bob.public,
        &alice.secret,
        Some(3600),
    )?;
    println!("Wire record: {}", serde_json::to_string_pretty(&record)?);

    // Bob opens it with his secret key and Alice's public key (carried in
    // the record).
    let plaintext = messenger.decrypt_message(&record, &bob.secret)?;
    println!("Decrypted: {}", String::from_utf8_lossy(&plaintext));

    println!("Digest: {}", hash(&plaintext));
    Ok(())
}
