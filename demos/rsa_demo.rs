//! # RSA Demo
//!
//! Demonstrates the RSA key lifecycle:
//! 1. Generate a key pair
//! 2. Persist and reload it as PEM
//! 3. Encrypt and decrypt with OAEP and PKCS#1 v1.5
//! 4. Sign and verify with PSS and PKCS#1 v1.5
//!
//! ## Run
//!
//! ```bash
//! cargo run --example rsa_demo
//! ```

use asym_core::rsa::{
    decrypt_oaep, decrypt_pkcs1v15, encrypt_oaep, encrypt_pkcs1v15, max_message_length,
    sign_pkcs1v15, sign_pss, verify_pkcs1v15, verify_pss,
};
use asym_core::{Error, RsaKeyPair, SystemRandom};
use sha2::Sha256;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=================================================");
    println!("              ASYM-CORE RSA DEMO");
    println!("=================================================\n");

    // =========================================================================
    // STEP 1: Generate a key pair
    // =========================================================================
    println!("1. Generating a 2048-bit RSA key pair...\n");

    let pair = RsaKeyPair::generate(2048, &mut SystemRandom).expect("Failed to generate key");
    println!("   Modulus size: {} bits", pair.key_size_bits());

    match RsaKeyPair::generate(512, &mut SystemRandom) {
        Err(Error::WeakParameter(msg)) => println!("   512-bit request refused: {}", msg),
        other => println!("   Unexpected result for 512 bits: {:?}", other.map(|_| ())),
    }
    println!();

    // =========================================================================
    // STEP 2: PEM round trip
    // =========================================================================
    println!("2. Exporting and re-importing PEM...\n");

    let private_pem = pair.private_key_to_pem().expect("Failed to export private key");
    let public_pem = pair.public_key_to_pem().expect("Failed to export public key");

    println!("{}", public_pem);
    println!("   Private key PEM: {} bytes (not shown)", private_pem.len());

    let restored = RsaKeyPair::private_key_from_pem(private_pem.as_bytes())
        .expect("Failed to import private key");
    let recipient = RsaKeyPair::public_key_from_pem(public_pem.as_bytes())
        .expect("Failed to import public key");
    println!(
        "   Restored pair matches: {}",
        if restored == pair { "[OK]" } else { "[FAILED]" }
    );
    println!();

    // =========================================================================
    // STEP 3: Encryption
    // =========================================================================
    println!("3. Encrypting \"test message\"...\n");

    for scheme in ["OAEP", "PKCS1v15"] {
        let max = max_message_length(recipient.public_key(), scheme).expect("Unknown scheme");
        println!("   {} max plaintext: {} bytes", scheme, max);
    }

    let ciphertext = encrypt_oaep(&mut SystemRandom, recipient.public_key(), b"test message")
        .expect("OAEP encryption failed");
    println!("   OAEP ciphertext: {}...", hex::encode(&ciphertext[..16]));
    let plaintext = decrypt_oaep(&mut SystemRandom, &restored, &ciphertext)
        .expect("OAEP decryption failed");
    println!("   OAEP decrypted: {}", String::from_utf8_lossy(&plaintext));

    let ciphertext = encrypt_pkcs1v15(&mut SystemRandom, recipient.public_key(), b"test message")
        .expect("PKCS1v15 encryption failed");
    let plaintext = decrypt_pkcs1v15(&mut SystemRandom, &restored, &ciphertext)
        .expect("PKCS1v15 decryption failed");
    println!("   PKCS1v15 decrypted: {}", String::from_utf8_lossy(&plaintext));

    let mut tampered = ciphertext.clone();
    tampered[0] ^= 0xff;
    match decrypt_pkcs1v15(&mut SystemRandom, &restored, &tampered) {
        Err(e) => println!("   Tampered ciphertext: {} (code {})", e, e.code()),
        Ok(_) => println!("   Tampered ciphertext: [FAILED] decrypted anyway"),
    }
    println!();

    // =========================================================================
    // STEP 4: Signatures
    // =========================================================================
    println!("4. Signing and verifying...\n");

    let message = b"Transfer 100 coins to Bob";

    let pss = sign_pss::<Sha256>(&mut SystemRandom, &pair, message).expect("PSS signing failed");
    let valid = verify_pss::<Sha256>(recipient.public_key(), message, &pss).is_ok();
    println!("   PSS signature: {}...", hex::encode(&pss[..16]));
    println!("   PSS valid: {}", if valid { "[OK]" } else { "[FAILED]" });

    let pkcs = sign_pkcs1v15::<Sha256>(&pair, message).expect("PKCS1v15 signing failed");
    let valid = verify_pkcs1v15::<Sha256>(recipient.public_key(), message, &pkcs).is_ok();
    println!("   PKCS1v15 valid: {}", if valid { "[OK]" } else { "[FAILED]" });

    let forged = verify_pss::<Sha256>(recipient.public_key(), b"Transfer 999 coins", &pss);
    println!("   Altered message: {:?}", forged);
    println!();

    println!("=== Example Complete ===");
}
