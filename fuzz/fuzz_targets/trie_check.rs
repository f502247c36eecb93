#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use prefix_dict::stats::DictStatsTrait;
use prefix_dict::{PrefixDictionary, Trie};

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: String },
    Insert { key: String, val: usize },
    Update { key: String, val: usize },
    Delete { key: String },
    Prefix { prefix: String },
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut trie = Trie::<usize>::new();
    let mut bt_map = BTreeMap::<String, usize>::new();

    for m in methods {
        match m {
            MapMethod::Get { key } => {
                if key.is_empty() {
                    assert!(trie.get(&key).is_err());
                    continue;
                }
                assert_eq!(trie.get(&key).unwrap(), bt_map.get(&key));
            }
            MapMethod::Insert { key, val } => {
                if key.is_empty() {
                    assert!(trie.insert(&key, val).is_err());
                    continue;
                }
                let btree_insert = bt_map.insert(key.clone(), val);
                assert_eq!(trie.insert(&key, val).unwrap(), btree_insert);
            }
            MapMethod::Update { key, val } => {
                if key.is_empty() {
                    continue;
                }
                let old_bt = bt_map.get_mut(&key);
                let old_trie = trie.get_mut(&key).unwrap();
                assert_eq!(old_trie, old_bt);
                if let (Some(old_bt), Some(old_trie)) = (old_bt, old_trie) {
                    *old_bt = val;
                    *old_trie = val;
                }
                assert_eq!(trie.get(&key).unwrap(), bt_map.get(&key));
            }
            MapMethod::Delete { key } => {
                if key.is_empty() {
                    assert!(trie.delete(&key).is_err());
                    continue;
                }
                let btr = bt_map.remove(&key);
                assert_eq!(trie.delete(&key).unwrap(), btr.is_some());
            }
            MapMethod::Prefix { prefix } => {
                let expected: Vec<(String, &usize)> = bt_map
                    .iter()
                    .filter(|(k, _)| k.starts_with(prefix.as_str()))
                    .map(|(k, v)| (k.clone(), v))
                    .collect();
                assert_eq!(trie.starts_with(&prefix), expected);
            }
        }
        assert_eq!(trie.len(), bt_map.len());
    }

    let stats = trie.get_dict_stats();
    assert!(stats.is_well_formed(), "{:?}", stats);
    assert_eq!(stats.num_terminals, bt_map.len());
});
