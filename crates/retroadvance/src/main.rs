use retroadvance::Program;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let frames = match args.next() {
        Some(frames) => frames.parse::<u32>()?,
        None => 60,
    };
    let program = match args.next() {
        Some(name) => name.parse::<Program>()?,
        None => {
            log::info!("No program given, running 'timers'");
            Program::Timers
        }
    };

    let held = match args.next() {
        Some(list) => retroadvance::parse_keys(&list)?,
        None => Vec::new(),
    };

    retroadvance::run(frames, program, &held)
}
