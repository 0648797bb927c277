fn main() -> std::process::ExitCode {
    chartfeed_lib::run()
}
