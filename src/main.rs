fn main() {
    if let Err(e) = terminal_hub_lib::run() {
        eprintln!("terminal-hub: {:#}", e);
        std::process::exit(1);
    }
}
