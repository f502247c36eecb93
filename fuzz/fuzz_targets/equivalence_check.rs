#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use prefix_dict::{PrefixDictionary, TernarySearchTree, Trie};

#[derive(Arbitrary, Debug)]
enum Op {
    Insert { key: String, val: u8 },
    Delete { key: String },
    Contains { key: String },
    Prefix { prefix: String },
    Clear,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut trie = Trie::<u8>::new();
    let mut tst = TernarySearchTree::<u8>::new();

    for op in ops {
        match op {
            Op::Insert { key, val } => {
                assert_eq!(trie.insert(&key, val), tst.insert(&key, val));
            }
            Op::Delete { key } => {
                assert_eq!(trie.delete(&key), tst.delete(&key));
            }
            Op::Contains { key } => {
                assert_eq!(trie.contains(&key), tst.contains(&key));
            }
            Op::Prefix { prefix } => {
                assert_eq!(trie.starts_with(&prefix), tst.starts_with(&prefix));
            }
            Op::Clear => {
                trie.clear();
                tst.clear();
            }
        }
        assert_eq!(trie.len(), tst.len());
    }
});
