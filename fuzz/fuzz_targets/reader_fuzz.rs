//! Reader fuzz target: feed arbitrary bytes to the decoders and the schema-less walk.
//! Nothing may panic; malformed input must come back as Err.
//! Build with: cargo fuzz run reader_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    use protowire::messages::clob::Order;
    use protowire::Message;

    // A message that decodes must re-encode to bytes that decode to the same value.
    if let Ok(order) = Order::decode(data) {
        let again = Order::decode(&order.encode_to_vec()).expect("re-decode");
        assert_eq!(again, order);
    }
    let walked = protowire::validate_fields(data);
    assert_eq!(walked.is_ok(), protowire::scan_fields(data).is_ok());
    let _ = protowire::dump_message(data);
    let _ = protowire::decode_frame::<Order>(data);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run reader_fuzz");
}
