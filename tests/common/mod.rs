// tests/common/mod.rs
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Stand-in for conjure:
/// - `type-check F` fails with `F:3:1: ...` on stderr when F contains BROKEN,
///   sleeps when F contains SLOW;
/// - `pretty F --output-format json` prints a small JSON document;
/// - `validate-solution ... --solution S` fails when S contains INVALID and
///   appends S to `validated.log` next to it.
const FAKE_CONJURE: &str = r#"#!/bin/sh
case "$1" in
  type-check)
    if grep -q SLOW "$2"; then sleep 5; fi
    if grep -q BROKEN "$2"; then
      echo "$2:3:1: unexpected BROKEN" >&2
      exit 1
    fi
    exit 0
    ;;
  pretty)
    printf '{"mStatements": [], "source": "%s"}\n' "$(head -n 1 "$2")"
    exit 0
    ;;
  validate-solution)
    for arg; do sol="$arg"; done
    echo "$sol" >> "$(dirname "$sol")/validated.log"
    if grep -q INVALID "$sol"; then
      echo "Solution is not valid" >&2
      exit 1
    fi
    exit 0
    ;;
esac
echo "unknown command $1" >&2
exit 2
"#;

/// Writes the fake conjure once per test binary. Doing it under a lock
/// before any test spawns processes avoids "text file busy" on exec.
pub fn fake_conjure() -> &'static Path {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        use std::os::unix::fs::PermissionsExt;

        let nonce = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "conjure_harness_fake_{}_{}",
            std::process::id(),
            nonce
        ));
        std::fs::create_dir_all(&dir).expect("create fake conjure dir");
        let path = dir.join("conjure");
        std::fs::write(&path, FAKE_CONJURE).expect("write fake conjure");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod fake conjure");
        path
    })
}

/// Solutions listed in `validated.log`, by file name, in order.
pub fn validated(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("validated.log"))
        .unwrap_or_default()
        .lines()
        .map(|line| {
            Path::new(line)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect()
}
