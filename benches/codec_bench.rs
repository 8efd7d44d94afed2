//! Benchmark: encode vs decode vs walk for a batch of orders, plus packed repeated ids.
//! Walk uses validate_fields only (no decode); the frame benches decode every entry.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use protowire::messages::clob::{GoodTil, Order, OrderId, Side, SubaccountId, TimeInForce};
use protowire::messages::delaymsg::BlockMessageIds;
use protowire::{decode_frame, encode_frame, scan_fields, validate_fields, Message};

fn make_orders(n: u32) -> Vec<Order> {
    (0..n)
        .map(|i| Order {
            order_id: Some(OrderId {
                subaccount_id: Some(SubaccountId {
                    owner: format!("dydx1trader{:04}", i % 64),
                    number: i % 4,
                }),
                client_id: i.wrapping_mul(2_654_435_761),
                order_flags: if i % 3 == 0 { 64 } else { 0 },
                clob_pair_id: i % 8,
            }),
            side: if i % 2 == 0 { Side::Buy } else { Side::Sell }.into(),
            quantums: 1_000_000 * (u64::from(i) + 1),
            subticks: 100_000 + u64::from(i),
            good_til: Some(GoodTil::Block(20_000_000 + i)),
            time_in_force: TimeInForce::Unspecified.into(),
            reduce_only: i % 5 == 0,
            client_metadata: i,
            ..Default::default()
        })
        .collect()
}

fn bench_codec(c: &mut Criterion) {
    let orders = make_orders(1_000);
    let encoded: Vec<Vec<u8>> = orders.iter().map(Order::encode_to_vec).collect();
    let frame = encode_frame(&orders);

    c.bench_function("encode_orders_1000", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for o in black_box(&orders) {
                total += o.encode_to_vec().len();
            }
            black_box(total)
        })
    });

    c.bench_function("decode_orders_1000", |b| {
        b.iter(|| {
            let mut ok = 0usize;
            for bytes in black_box(&encoded) {
                if Order::decode(bytes).is_ok() {
                    ok += 1;
                }
            }
            black_box(ok)
        })
    });

    c.bench_function("decode_encode_orders_1000", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for bytes in black_box(&encoded) {
                if let Ok(o) = Order::decode(bytes) {
                    total += o.encode_to_vec().len();
                }
            }
            black_box(total)
        })
    });

    c.bench_function("walk_orders_1000", |b| {
        b.iter(|| {
            let mut fields = 0usize;
            for bytes in black_box(&encoded) {
                fields += validate_fields(bytes).unwrap_or(0);
            }
            black_box(fields)
        })
    });

    c.bench_function("scan_orders_1000", |b| {
        b.iter(|| {
            let mut fields = 0usize;
            for bytes in black_box(&encoded) {
                fields += scan_fields(bytes).map(|f| f.len()).unwrap_or(0);
            }
            black_box(fields)
        })
    });

    c.bench_function("decode_frame_orders_1000", |b| {
        b.iter(|| {
            let result = decode_frame::<Order>(black_box(&frame)).expect("frame");
            black_box(result.messages.len())
        })
    });

    let ids = BlockMessageIds {
        message_ids: (0..10_000).map(|i| i * 37).collect(),
    };
    let packed = ids.encode_to_vec();
    c.bench_function("decode_packed_ids_10000", |b| {
        b.iter(|| {
            let decoded = BlockMessageIds::decode(black_box(&packed)).expect("decode");
            black_box(decoded.message_ids.len())
        })
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
