use newcmd_block_header::{BlockHeader, CliqueProposal, EXTRA_VANITY, recover_block_signer};
use newcmd_primitives::{Address, B64, B256, Bloom, Bytes, U256, address, b256, hex};
use newcmd_signer::{RecoverableSignature, RecoveryId, SECP256K1_ORDER};
use newcmd_test_utils::secret_key::dummy_secret_key;

const SIGNER: Address = address!("be862ad9abfe6f22bcb087716c7d89a26051f74c");

const SEAL_HASH: B256 = b256!("d4525dff25f234a393d254a6c5959e6a10bbc08843639ce6571ba52bda689ade");
const SEAL: &str = "a5671982ae4d03cf35016fd2c4b004dad5f96fe62236fe68ff5f768ce4b9536b57eae5d88a5ddfbf1aac24dd9c87655603e247b3fde17396288b27750631eb2800";

const SEAL_HASH_WITH_BASE_FEE: B256 =
    b256!("3d05c461578a3b320313c7df50738afc867748a66a9d6dd0f2fef267218a1171");
const SEAL_WITH_BASE_FEE: &str = "2e7ab9ea38e3142e491f2f8c0b31237639538d84a56582f38b2d87c584156b644485f55f94e51095d2173304a0d0456208f8f6b577d39c283e834e73992ee77101";

fn header(seal: &str, base_fee_per_gas: Option<u128>) -> anyhow::Result<BlockHeader> {
    let mut extra_data = vec![0u8; EXTRA_VANITY];
    extra_data.extend(hex::decode(seal)?);

    Ok(BlockHeader {
        parent_hash: B256::repeat_byte(0x11),
        ommers_hash: b256!("1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347"),
        beneficiary: Address::ZERO,
        state_root: B256::repeat_byte(0x22),
        transactions_root: B256::repeat_byte(0x33),
        receipts_root: B256::repeat_byte(0x44),
        logs_bloom: Bloom::ZERO,
        difficulty: U256::from(2),
        number: 100,
        gas_limit: 8_000_000,
        gas_used: 21_000,
        timestamp: 1_600_000_000,
        extra_data: Bytes::from(extra_data),
        mix_hash: B256::ZERO,
        nonce: B64::ZERO,
        base_fee_per_gas,
    })
}

#[test]
fn recovers_signer() -> anyhow::Result<()> {
    let header = header(SEAL, None)?;

    assert_eq!(header.seal_hash()?, SEAL_HASH);
    assert_eq!(recover_block_signer(&header)?, SIGNER);
    assert_eq!(
        header.hash(),
        b256!("e188ccc0b70ec6cf077d6cb93b0d497533f0acabf8318770b8424a9b427e7c8d")
    );

    Ok(())
}

#[test]
fn recovers_signer_with_base_fee() -> anyhow::Result<()> {
    let header = header(SEAL_WITH_BASE_FEE, Some(7))?;

    assert_eq!(header.seal_hash()?, SEAL_HASH_WITH_BASE_FEE);
    assert_eq!(header.recover_signer()?, SIGNER);

    Ok(())
}

#[test]
fn recovers_signer_of_high_s_seal() -> anyhow::Result<()> {
    let seal = RecoverableSignature::try_from(hex::decode(SEAL)?.as_slice())?;
    let high_s = RecoverableSignature {
        s: SECP256K1_ORDER - seal.s,
        recovery_id: RecoveryId::from_y_parity(seal.recovery_id.to_u8() == 0),
        ..seal
    };

    let header = header(&hex::encode(high_s.to_bytes()), None)?;

    assert_eq!(header.seal_hash()?, SEAL_HASH);
    assert_eq!(recover_block_signer(&header)?, SIGNER);

    Ok(())
}

#[test]
fn seal_hash_ignores_seal() -> anyhow::Result<()> {
    let sealed = header(SEAL, None)?;
    let unsealed = header(&"00".repeat(65), None)?;

    assert_eq!(sealed.seal_hash()?, unsealed.seal_hash()?);
    assert_ne!(sealed.hash(), unsealed.hash());

    Ok(())
}

#[test]
fn sealing_produces_known_signature() -> anyhow::Result<()> {
    let header = header(SEAL, None)?;

    let signature = RecoverableSignature::sign_prehash(&header.seal_hash()?, &dummy_secret_key())?;
    assert_eq!(hex::encode(signature.to_bytes()), SEAL);

    Ok(())
}

#[test]
fn tampered_header_recovers_other_signer() -> anyhow::Result<()> {
    let mut header = header(SEAL, None)?;
    header.gas_used += 1;

    assert_ne!(recover_block_signer(&header)?, SIGNER);

    Ok(())
}

#[test]
fn rlp_decoding() -> anyhow::Result<()> {
    for header in [header(SEAL, None)?, header(SEAL_WITH_BASE_FEE, Some(7))?] {
        let encoded = alloy_rlp::encode(&header);
        let decoded: BlockHeader = alloy_rlp::Decodable::decode(&mut encoded.as_slice())?;

        assert_eq!(decoded, header);
    }

    Ok(())
}

#[test]
fn rpc_json() -> anyhow::Result<()> {
    let json = format!(
        r#"{{
            "hash": "0xe188ccc0b70ec6cf077d6cb93b0d497533f0acabf8318770b8424a9b427e7c8d",
            "parentHash": "0x{parent_hash}",
            "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
            "miner": "0x0000000000000000000000000000000000000000",
            "stateRoot": "0x{state_root}",
            "transactionsRoot": "0x{transactions_root}",
            "receiptsRoot": "0x{receipts_root}",
            "logsBloom": "0x{logs_bloom}",
            "difficulty": "0x2",
            "number": "0x64",
            "gasLimit": "0x7a1200",
            "gasUsed": "0x5208",
            "timestamp": "0x5f5e1000",
            "extraData": "0x{vanity}{SEAL}",
            "mixHash": "0x{mix_hash}",
            "nonce": "0x0000000000000000"
        }}"#,
        parent_hash = "11".repeat(32),
        state_root = "22".repeat(32),
        transactions_root = "33".repeat(32),
        receipts_root = "44".repeat(32),
        logs_bloom = "00".repeat(256),
        vanity = "00".repeat(EXTRA_VANITY),
        mix_hash = "00".repeat(32),
    );

    let decoded: BlockHeader = serde_json::from_str(&json)?;
    assert_eq!(decoded, header(SEAL, None)?);
    assert_eq!(recover_block_signer(&decoded)?, SIGNER);

    let serialized = serde_json::to_value(&decoded)?;
    assert_eq!(serialized["number"], "0x64");
    assert_eq!(serialized["miner"], "0x0000000000000000000000000000000000000000");
    assert!(serialized.get("baseFeePerGas").is_none());

    Ok(())
}

#[test]
fn rpc_json_with_base_fee() -> anyhow::Result<()> {
    let header = header(SEAL_WITH_BASE_FEE, Some(7))?;

    let serialized = serde_json::to_value(&header)?;
    assert_eq!(serialized["baseFeePerGas"], "0x7");

    let deserialized: BlockHeader = serde_json::from_value(serialized)?;
    assert_eq!(deserialized, header);

    Ok(())
}

#[test]
fn vote_of_sealed_block() -> anyhow::Result<()> {
    let candidate = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    let header = BlockHeader {
        beneficiary: candidate,
        nonce: B64::new([0xff; 8]),
        ..header(SEAL, None)?
    };

    assert_eq!(
        header.clique_proposal(),
        Some(CliqueProposal::Authorize(candidate))
    );

    Ok(())
}
