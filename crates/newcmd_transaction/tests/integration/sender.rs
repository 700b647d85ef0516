use newcmd_primitives::{Address, U256};
use newcmd_signer::{InvalidSignatureValue, SECP256K1_ORDER, SignatureError};
use newcmd_test_utils::secret_key::{DUMMY_SECRET_KEY, secret_key_to_address};
use newcmd_transaction::{Signed, TransactionError, decode_signed};

// Generated by Hardhat
const SIGNED_EIP1559: &str = "02f8be010102050394c014ba5ec014ba5ec014ba5ec014ba5ec014ba5e04821234f85bf859940000000000000000000000000000000000000000f842a00000000000000000000000000000000000000000000000000000000000000000a0000000000000000000000000000000000000000000000000000000000000000101a07764e376b5b4090264f73abee68ebb5fdc9f76050eff800237e5a2bedadcd7eda044c0ae9b07c75cf4e0a14aebfe792ab2fdccd7d89550b166b1b4a4ece0054f02";

fn signed_transaction() -> Signed {
    let raw = hex::decode(SIGNED_EIP1559).expect("valid hex");
    decode_signed(&raw).expect("valid transaction")
}

fn sender() -> Address {
    secret_key_to_address(DUMMY_SECRET_KEY).expect("valid secret key")
}

#[test]
fn verifies_claimed_sender() -> anyhow::Result<()> {
    signed_transaction().verify_sender(&sender())?;
    Ok(())
}

#[test]
fn rejects_other_sender() {
    let other = Address::repeat_byte(0x42);

    assert!(matches!(
        signed_transaction().verify_sender(&other),
        Err(TransactionError::SenderMismatch { expected, recovered })
            if expected == other && recovered == sender()
    ));
}

fn assert_rejected(transaction: &Signed) {
    match transaction.verify_sender(&sender()) {
        Err(
            TransactionError::SenderMismatch { .. }
            | TransactionError::Signature(
                SignatureError::InvalidSignatureValues(_) | SignatureError::ECDSAError(_),
            ),
        ) => {}
        result => panic!("expected rejection, got {result:?}"),
    }
}

#[test]
fn single_bit_flips_are_detected() {
    for bit in [0usize, 1, 7, 128, 255] {
        let mut transaction = signed_transaction();
        transaction.signature.r ^= U256::from(1) << bit;
        assert_rejected(&transaction);

        let mut transaction = signed_transaction();
        transaction.signature.s ^= U256::from(1) << bit;
        assert_rejected(&transaction);
    }

    // Changes the signed content and thereby the digest.
    let mut transaction = signed_transaction();
    let nonce = match &mut transaction.request {
        newcmd_transaction::Request::Eip1559(request) => &mut request.nonce,
        request => panic!("expected an EIP-1559 request, got {request:?}"),
    };
    *nonce ^= 1;
    assert_rejected(&transaction);
}

#[test]
fn changing_v_changes_the_sender() {
    let mut transaction = signed_transaction();
    transaction.signature.v ^= 1;
    assert_rejected(&transaction);

    let mut transaction = signed_transaction();
    transaction.signature.v = 27;
    assert!(matches!(
        transaction.verify_sender(&sender()),
        Err(TransactionError::Signature(
            SignatureError::InvalidSignatureValues(_)
        ))
    ));
}

#[test]
fn rejects_high_s() {
    let mut transaction = signed_transaction();
    transaction.signature.s = SECP256K1_ORDER - transaction.signature.s;
    transaction.signature.v ^= 1;

    assert!(matches!(
        transaction.recover_sender(),
        Err(SignatureError::InvalidSignatureValues(
            InvalidSignatureValue::S
        ))
    ));
    assert!(matches!(
        transaction.verify_sender(&sender()),
        Err(TransactionError::Signature(
            SignatureError::InvalidSignatureValues(InvalidSignatureValue::S)
        ))
    ));
}
