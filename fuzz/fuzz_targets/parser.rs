#![no_main]
use libfuzzer_sys::fuzz_target;
use vcfg::{from_bytes, Config, Parser};

fuzz_target!(|data: &[u8]| {
    let _ = from_bytes(data);

    let mut parser = Parser::with_config(Config::default().with_strict(true));
    parser.set_buffer(data);
    let _ = parser.parse();
});
