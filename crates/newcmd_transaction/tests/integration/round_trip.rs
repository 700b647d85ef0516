use newcmd_eip2930::{AccessList, AccessListItem};
use newcmd_primitives::{Address, B256, Bytes, ChainId, MAX_CHAIN_ID, U256};
use newcmd_test_utils::secret_key::dummy_secret_key;
use newcmd_transaction::{Eip1559, Eip2930, Legacy, MaybeSigned, Request, decode};
use proptest::prelude::*;

fn u256() -> impl Strategy<Value = U256> {
    prop_oneof![
        Just(U256::ZERO),
        any::<u64>().prop_map(U256::from),
        any::<[u8; 32]>().prop_map(U256::from_be_bytes),
    ]
}

fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from)
}

fn chain_id() -> impl Strategy<Value = ChainId> {
    (1..=MAX_CHAIN_ID).prop_map(|value| ChainId::try_from(value).expect("in range"))
}

fn input() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..80).prop_map(Bytes::from)
}

fn access_list() -> impl Strategy<Value = AccessList> {
    prop::collection::vec(
        (
            address(),
            prop::collection::vec(any::<[u8; 32]>().prop_map(B256::from), 0..3),
        )
            .prop_map(|(address, storage_keys)| AccessListItem {
                address,
                storage_keys,
            }),
        0..3,
    )
    .prop_map(AccessList)
}

fn request() -> impl Strategy<Value = Request> {
    let legacy = (
        any::<u64>(),
        u256(),
        any::<u64>(),
        prop::option::of(address()),
        u256(),
        input(),
        prop::option::of(chain_id()),
    )
        .prop_map(
            |(nonce, gas_price, gas_limit, to, value, input, chain_id)| {
                Request::Legacy(Legacy {
                    nonce,
                    gas_price,
                    gas_limit,
                    to,
                    value,
                    input,
                    chain_id,
                })
            },
        );

    let eip2930 = (
        chain_id(),
        any::<u64>(),
        u256(),
        any::<u64>(),
        prop::option::of(address()),
        u256(),
        input(),
        access_list(),
    )
        .prop_map(
            |(chain_id, nonce, gas_price, gas_limit, to, value, input, access_list)| {
                Request::Eip2930(Eip2930 {
                    chain_id,
                    nonce,
                    gas_price,
                    gas_limit,
                    to,
                    value,
                    input,
                    access_list,
                })
            },
        );

    let eip1559 = (
        chain_id(),
        any::<u64>(),
        (u256(), u256()),
        any::<u64>(),
        prop::option::of(address()),
        u256(),
        input(),
        access_list(),
    )
        .prop_map(
            |(
                chain_id,
                nonce,
                (max_priority_fee_per_gas, max_fee_per_gas),
                gas_limit,
                to,
                value,
                input,
                access_list,
            )| {
                Request::Eip1559(Eip1559 {
                    chain_id,
                    nonce,
                    max_priority_fee_per_gas,
                    max_fee_per_gas,
                    gas_limit,
                    to,
                    value,
                    input,
                    access_list,
                })
            },
        );

    prop_oneof![legacy, eip2930, eip1559]
}

proptest! {
    #[test]
    fn unsigned_round_trip(request in request()) {
        let transaction = MaybeSigned::Unsigned(request);
        let encoded = transaction.encode();

        prop_assert_eq!(decode(&encoded).expect("valid encoding"), transaction);
    }

    #[test]
    fn signed_round_trip(request in request()) {
        let signed = request.sign(&dummy_secret_key()).expect("signing succeeds");
        let encoded = signed.encode();

        let decoded = decode(&encoded).expect("valid encoding");
        prop_assert_eq!(decoded.encode(), encoded);
        prop_assert_eq!(decoded, MaybeSigned::Signed(signed));
    }
}

#[test]
fn contract_creation_with_empty_fields() -> anyhow::Result<()> {
    let requests = [
        Request::Legacy(Legacy {
            nonce: 0,
            gas_price: U256::ZERO,
            gas_limit: 0,
            to: None,
            value: U256::ZERO,
            input: Bytes::new(),
            chain_id: None,
        }),
        Request::Eip2930(Eip2930 {
            chain_id: ChainId::try_from(1u64)?,
            nonce: 0,
            gas_price: U256::ZERO,
            gas_limit: 0,
            to: None,
            value: U256::ZERO,
            input: Bytes::new(),
            access_list: AccessList::default(),
        }),
        Request::Eip1559(Eip1559 {
            chain_id: ChainId::try_from(1u64)?,
            nonce: 0,
            max_priority_fee_per_gas: U256::ZERO,
            max_fee_per_gas: U256::ZERO,
            gas_limit: 0,
            to: None,
            value: U256::ZERO,
            input: Bytes::new(),
            access_list: AccessList::default(),
        }),
    ];

    for request in requests {
        let transaction = MaybeSigned::Unsigned(request);
        assert_eq!(decode(&transaction.encode())?, transaction);
    }

    Ok(())
}
