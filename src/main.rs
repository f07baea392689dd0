fn main() -> Result<(), Box<dyn std::error::Error>> {
    sessionchat::cli::main()
}
