use newcmd_eip2930::{AccessList, AccessListItem};
use newcmd_primitives::{Address, B256, Bytes, ChainId, U256, address, b256, bytes};
use newcmd_test_utils::secret_key::{
    DUMMY_SECRET_KEY, EIP155_SECRET_KEY, dummy_secret_key, secret_key_from_str,
    secret_key_to_address,
};
use newcmd_transaction::{
    Eip1559, Eip2930, Legacy, MaybeSigned, Request, decode, decode_signed, signing_digest,
    signing_preimage,
};

const RECIPIENT: Address = address!("c014ba5ec014ba5ec014ba5ec014ba5ec014ba5e");

fn chain_id(value: u64) -> ChainId {
    ChainId::try_from(value).expect("valid chain ID")
}

fn dummy_access_list() -> AccessList {
    AccessList(vec![AccessListItem {
        address: Address::ZERO,
        storage_keys: vec![
            B256::ZERO,
            b256!("0000000000000000000000000000000000000000000000000000000000000001"),
        ],
    }])
}

fn dummy_legacy(chain_id: Option<ChainId>) -> Legacy {
    Legacy {
        nonce: 1,
        gas_price: U256::from(2),
        gas_limit: 3,
        to: Some(RECIPIENT),
        value: U256::from(4),
        input: bytes!("1234"),
        chain_id,
    }
}

struct Vector {
    request: Request,
    unsigned: &'static str,
    digest: B256,
    signed: &'static str,
}

fn vectors() -> Vec<Vector> {
    vec![
        // Generated by Hardhat
        Vector {
            request: Request::Legacy(dummy_legacy(None)),
            unsigned: "dc01020394c014ba5ec014ba5ec014ba5ec014ba5ec014ba5e04821234",
            digest: b256!("41a46eddeeb251dc89bfe9d59ad27413909630a4c973dbdbbf23ab4aeed02818"),
            signed: "f85f01020394c014ba5ec014ba5ec014ba5ec014ba5ec014ba5e048212341ca0c62d73a484ff7c53a0cfdf8eaa5e5896491b70971e9ce4a3e8750772b7c0203fa00562866909572aee9ab72df7470c1dd7aa29b056597be57c17e06f1ee303e7eb",
        },
        Vector {
            request: Request::Legacy(dummy_legacy(Some(chain_id(1007)))),
            unsigned: "e101020394c014ba5ec014ba5ec014ba5ec014ba5ec014ba5e048212348203ef8080",
            digest: b256!("b9e846e2026ce0e54cf7a69251f6adb1cbf7b8f483768bfd4c487f75c4deb1c5"),
            signed: "f86101020394c014ba5ec014ba5ec014ba5ec014ba5ec014ba5e04821234820802a05bb00924d61b37f09604f48c491e7961fd0bc5f621566480457979bf0a242b9aa065d40af11383f9db5781e6f1ce3867d84e97945e6f089dd364ae736c46e83c3a",
        },
        Vector {
            request: Request::Eip2930(Eip2930 {
                chain_id: chain_id(1),
                nonce: 1,
                gas_price: U256::from(2),
                gas_limit: 3,
                to: Some(RECIPIENT),
                value: U256::from(4),
                input: bytes!("1234"),
                access_list: dummy_access_list(),
            }),
            unsigned: "01f87a0101020394c014ba5ec014ba5ec014ba5ec014ba5ec014ba5e04821234f85bf859940000000000000000000000000000000000000000f842a00000000000000000000000000000000000000000000000000000000000000000a00000000000000000000000000000000000000000000000000000000000000001",
            digest: b256!("bc070f66a83bf3513c9db59e7ccaf68870b148cc40b3da9bf20a53918489cfc7"),
            signed: "01f8bd0101020394c014ba5ec014ba5ec014ba5ec014ba5ec014ba5e04821234f85bf859940000000000000000000000000000000000000000f842a00000000000000000000000000000000000000000000000000000000000000000a0000000000000000000000000000000000000000000000000000000000000000101a0a9f9f0c845cc2d257838df2679a59af6f19055012ce1de11ba25b4ca9df503cfa02c70c54cf6c49b4a641b269c93308fa07de541aa3bcd3fce0fc722aaabe3a8d8",
        },
        // Generated by Hardhat
        Vector {
            request: Request::Eip1559(Eip1559 {
                chain_id: chain_id(1),
                nonce: 1,
                max_priority_fee_per_gas: U256::from(2),
                max_fee_per_gas: U256::from(5),
                gas_limit: 3,
                to: Some(RECIPIENT),
                value: U256::from(4),
                input: bytes!("1234"),
                access_list: dummy_access_list(),
            }),
            unsigned: "02f87b010102050394c014ba5ec014ba5ec014ba5ec014ba5ec014ba5e04821234f85bf859940000000000000000000000000000000000000000f842a00000000000000000000000000000000000000000000000000000000000000000a00000000000000000000000000000000000000000000000000000000000000001",
            digest: b256!("1d21c520c93f0f8e07c2466361b22a8bb9906cdbf4670e53a701c075bbe69ecf"),
            signed: "02f8be010102050394c014ba5ec014ba5ec014ba5ec014ba5ec014ba5e04821234f85bf859940000000000000000000000000000000000000000f842a00000000000000000000000000000000000000000000000000000000000000000a0000000000000000000000000000000000000000000000000000000000000000101a07764e376b5b4090264f73abee68ebb5fdc9f76050eff800237e5a2bedadcd7eda044c0ae9b07c75cf4e0a14aebfe792ab2fdccd7d89550b166b1b4a4ece0054f02",
        },
    ]
}

#[test]
fn unsigned_encoding_and_digest() {
    for Vector {
        request,
        unsigned,
        digest,
        ..
    } in vectors()
    {
        let preimage = signing_preimage(&request);
        assert_eq!(hex::encode(&preimage), unsigned, "{request:?}");
        assert_eq!(signing_digest(&request), digest, "{request:?}");

        let decoded = decode(&preimage).expect("valid unsigned encoding");
        assert_eq!(decoded, MaybeSigned::Unsigned(request));
    }
}

#[test]
fn signing_matches_vectors() -> anyhow::Result<()> {
    let secret_key = dummy_secret_key();
    let sender = secret_key_to_address(DUMMY_SECRET_KEY)?;

    for Vector {
        request, signed, ..
    } in vectors()
    {
        let transaction = request.sign(&secret_key)?;
        assert_eq!(hex::encode(transaction.encode()), signed);
        assert_eq!(transaction.recover_sender()?, sender);
    }

    Ok(())
}

#[test]
fn decoding_matches_vectors() -> anyhow::Result<()> {
    let sender = secret_key_to_address(DUMMY_SECRET_KEY)?;

    for Vector {
        request, signed, ..
    } in vectors()
    {
        let raw = hex::decode(signed)?;
        let transaction = decode_signed(&raw)?;

        assert_eq!(transaction.request, request);
        assert_eq!(transaction.encode(), raw);
        transaction.verify_sender(&sender)?;
    }

    Ok(())
}

#[test]
fn hardhat_legacy_transaction_hash() -> anyhow::Result<()> {
    const EXPECTED: B256 =
        b256!("854a9427d54aaca361e7c592b4c3dc7da279c52a00cad157dab0365dcc27578d");

    let raw = hex::decode(vectors()[0].signed)?;
    let transaction = decode_signed(&raw)?;

    assert_eq!(transaction.signature.v, 28);
    assert_eq!(transaction.transaction_hash(), EXPECTED);

    Ok(())
}

// Example from https://eips.ethereum.org/EIPS/eip-155
#[test]
fn eip155_example() -> anyhow::Result<()> {
    let request = Request::Legacy(Legacy {
        nonce: 9,
        gas_price: U256::from(20_000_000_000u64),
        gas_limit: 21_000,
        to: Some(address!("3535353535353535353535353535353535353535")),
        value: U256::from(1_000_000_000_000_000_000u64),
        input: Bytes::new(),
        chain_id: Some(chain_id(1)),
    });

    assert_eq!(
        hex::encode(signing_preimage(&request)),
        "ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080"
    );
    assert_eq!(
        signing_digest(&request),
        b256!("daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53")
    );

    let secret_key = secret_key_from_str(EIP155_SECRET_KEY)?;
    let signed = request.sign(&secret_key)?;

    assert_eq!(signed.signature.v, 37);
    assert_eq!(
        hex::encode(signed.encode()),
        "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
    );
    assert_eq!(
        signed.transaction_hash(),
        b256!("33469b22e9f636356c4160a87eb19df52b7412e8eac32a4a55ffe88ea8350788")
    );
    assert_eq!(
        signed.recover_sender()?,
        address!("9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f")
    );

    Ok(())
}
