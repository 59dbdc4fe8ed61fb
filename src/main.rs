use straits_covered::error::AppResult;
use straits_covered::util::{settings::Settings, DateTimeUtils};
use straits_covered::App;

fn run() -> AppResult<()> {
    let app = App::from_settings(Settings::load()?)?;

    let date = match std::env::args().nth(1) {
        Some(arg) => DateTimeUtils::parse_date(&arg)?,
        None => app.today(),
    };

    let day_view = app.day_view(date)?;
    println!("{}", serde_json::to_string_pretty(&day_view)?);

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
