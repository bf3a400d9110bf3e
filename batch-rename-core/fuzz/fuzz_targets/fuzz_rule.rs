#![no_main]

use batch_rename_core::{split_name, RenameMode, RenameRule};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let mut parts = input.splitn(3, '\n');
    let name: String = parts.next().unwrap_or_default().chars().take(100).collect();
    let match_text = parts.next().unwrap_or_default();
    let replacement_text = parts.next().unwrap_or_default();

    let (_, extension) = split_name(&name);

    for mode in RenameMode::ALL {
        let rule = RenameRule {
            mode,
            match_text: match_text.to_string(),
            replacement_text: replacement_text.to_string(),
        };
        let proposed = rule.apply(&name);
        assert!(proposed.ends_with(extension));
    }
});
