#![no_main]
use libfuzzer_sys::fuzz_target;
use vcfg::{from_bytes, Node, Scope};

fn walk(doc: &vcfg::Document, node: &Node) {
    let _ = node.as_int();
    let _ = node.as_float();
    for child in node.children() {
        let _ = doc.get_node(node, child.name());
        walk(doc, child);
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = from_bytes(data) {
        for section in doc.sections() {
            for key in section.keys() {
                let _ = doc.get_node(Scope::from(section.name()), key.name());
                walk(&doc, key);
            }
        }
        let _ = doc.to_string();
    }
});
