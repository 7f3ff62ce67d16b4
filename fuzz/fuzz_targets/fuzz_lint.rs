#![no_main]

use automation_lint::LintOptions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let value = match automation_lint::parse(&s) {
        Ok(v) => v,
        Err(_) => return,
    };

    for strict in [false, true] {
        for naming in [false, true] {
            let options = LintOptions::default()
                .with_strict(strict)
                .with_naming(naming);
            let first = automation_lint::lint(&value, &options);
            let second = automation_lint::lint(&value, &options);

            assert_eq!(first.valid, first.errors.is_empty());
            // Linting holds no state between calls.
            if first != second {
                panic!(
                    "Idempotence failure with {:?}.\nInput (lossy): {:?}\nFirst: {:?}\nSecond: {:?}",
                    options,
                    s.get(..200).unwrap_or(&s),
                    first.errors,
                    second.errors,
                );
            }
        }
    }
});
