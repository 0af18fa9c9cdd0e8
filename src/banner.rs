// src/banner.rs

/// Prints the server startup banner to the console.
pub fn print_banner() {
    let banner = r#"
                  _
  ___ ___  _ __  (_)_   _ _ __ ___
 / __/ _ \| '_ \ | | | | | '__/ _ \
| (_| (_) | | | || | |_| | | |  __/
 \___\___/|_| |_|/ |\__,_|_|  \___|
               |__/

    Essence front-end server
"#;
    println!("{}", banner);
}
