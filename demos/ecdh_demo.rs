//! # ECDH Demo
//!
//! Demonstrates elliptic-curve key agreement between two parties.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example ecdh_demo
//! ```

use asym_core::ec::{
    compute_shared, compute_shared_hkdf, key_exchange, shared_secret_test, validate_key_pair,
};
use asym_core::{Curve, EcPublicKey, EcdhKeyPair, SystemRandom};
use sha2::Sha256;

fn main() {
    println!("=================================================");
    println!("              ASYM-CORE ECDH DEMO");
    println!("=================================================\n");

    // =========================================================================
    // STEP 1: Both parties generate key pairs
    // =========================================================================
    println!("1. Alice and Bob generate P-256 key pairs...\n");

    let alice = EcdhKeyPair::generate_p256(&mut SystemRandom).expect("Failed to generate");
    let bob = EcdhKeyPair::generate_p256(&mut SystemRandom).expect("Failed to generate");

    validate_key_pair(&alice).expect("Alice's pair is invalid");
    validate_key_pair(&bob).expect("Bob's pair is invalid");
    println!("   Both pairs validated");
    println!();

    // =========================================================================
    // STEP 2: Exchange public keys and compute the shared secret
    // =========================================================================
    println!("2. Computing the shared secret on both sides...\n");

    let alice_secret = compute_shared(&alice, bob.public_key()).expect("Exchange failed");
    let bob_secret = compute_shared(&bob, alice.public_key()).expect("Exchange failed");

    println!("   Alice: {}", hex::encode(alice_secret.as_slice()));
    println!("   Bob:   {}", hex::encode(bob_secret.as_slice()));
    println!(
        "   Match: {}",
        if shared_secret_test(&alice, &bob).expect("Test failed") {
            "[OK]"
        } else {
            "[FAILED]"
        }
    );
    println!();

    // =========================================================================
    // STEP 3: Derive symmetric keys
    // =========================================================================
    println!("3. Deriving symmetric keys...\n");

    let key = key_exchange(&alice, bob.public_key(), 32).expect("KDF failed");
    println!("   Hash-counter KDF (SHA-256, 32 bytes): {}", hex::encode(key.as_slice()));

    let key = compute_shared_hkdf::<Sha256>(&alice, bob.public_key(), b"session-1", b"demo", 32)
        .expect("HKDF failed");
    println!("   HKDF-SHA256 (32 bytes):                {}", hex::encode(key.as_slice()));
    println!();

    // =========================================================================
    // STEP 4: Invalid peers
    // =========================================================================
    println!("4. Rejecting invalid peers...\n");

    let bogus = EcPublicKey::new(Curve::P256, &[1], &[1]).expect("Coordinates too long");
    match compute_shared(&alice, &bogus) {
        Err(e) => println!("   Point (1, 1): {}", e),
        Ok(_) => println!("   Point (1, 1): [FAILED] accepted"),
    }

    let carol = EcdhKeyPair::generate_p384(&mut SystemRandom).expect("Failed to generate");
    match compute_shared(&alice, carol.public_key()) {
        Err(e) => println!("   P-384 peer:   {}", e),
        Ok(_) => println!("   P-384 peer:   [FAILED] accepted"),
    }
    println!();

    println!("=================================================");
    println!("                 DEMO COMPLETE");
    println!("=================================================");
}
