//! # ECDSA Demo
//!
//! Demonstrates ECDSA signatures on the NIST prime curves.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example ecdsa_demo
//! ```

use asym_core::ec::{sign, sign_sha256, verify, verify_sha256};
use asym_core::{Curve, EcdsaKeyPair, EcdsaSignature, SystemRandom};
use sha2::Sha512;

fn main() {
    println!("=== asym-core: ECDSA Demo ===\n");

    // Step 1: Create key pairs on every curve
    println!("Step 1: Generating key pairs...");

    let pairs: Vec<EcdsaKeyPair> = Curve::ALL
        .iter()
        .map(|&curve| EcdsaKeyPair::generate(curve, &mut SystemRandom).expect("Failed to generate"))
        .collect();

    for pair in &pairs {
        let (x, _) = pair.public_key().coordinates();
        println!("  {}: X = {}...", pair.curve(), hex::encode(&x[..8]));
    }
    println!();

    // Step 2: Sign "test" with SHA-256 on P-256
    println!("Step 2: Signing \"test\" on P-256...");

    let alice = &pairs[0];
    let sig = sign_sha256(&mut SystemRandom, alice, b"test").expect("Signing failed");
    println!("  r = {}", hex::encode(&sig.r));
    println!("  s = {}", hex::encode(&sig.s));
    println!();

    // Step 3: Verify with the right and the wrong key
    println!("Step 3: Verifying...");

    let bob = EcdsaKeyPair::generate_p256(&mut SystemRandom).expect("Failed to generate");
    let own = verify_sha256(alice.public_key(), b"test", &sig.r, &sig.s);
    let other = verify_sha256(bob.public_key(), b"test", &sig.r, &sig.s);
    println!("  With Alice's key: {}", if own { "[OK]" } else { "[FAILED]" });
    println!("  With Bob's key:   {}", if other { "[FAILED]" } else { "[REJECTED as expected]" });
    println!();

    // Step 4: SHA-512 on every curve
    println!("Step 4: SHA-512 signatures on every curve...");

    for pair in &pairs {
        let sig = sign::<Sha512>(&mut SystemRandom, pair, b"hello").expect("Signing failed");
        let valid = verify::<Sha512>(pair.public_key(), b"hello", &sig.r, &sig.s);
        println!(
            "  {}: {} byte scalars, valid: {}",
            pair.curve(),
            sig.r.len(),
            if valid { "[OK]" } else { "[FAILED]" }
        );
    }
    println!();

    // Step 5: DER encoding and PEM persistence
    println!("Step 5: DER signature and PEM keys...");

    let der = sig.to_der().expect("DER encoding failed");
    println!("  DER signature: {} bytes", der.len());
    let decoded = EcdsaSignature::from_der(Curve::P256, &der).expect("DER decoding failed");
    println!("  DER round trip: {}", if decoded == sig { "[OK]" } else { "[FAILED]" });

    let public_pem = alice.public_key_to_pem().expect("PEM export failed");
    println!("{}", public_pem);
    let verifier = EcdsaKeyPair::public_key_from_pem(public_pem.as_bytes()).expect("PEM import failed");
    let valid = verify_sha256(verifier.public_key(), b"test", &sig.r, &sig.s);
    println!("  Verify with reloaded key: {}", if valid { "[OK]" } else { "[FAILED]" });
    println!();

    println!("=== Example Complete ===");
}
