use colored::Colorize;

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod report;
pub mod session;

pub use seointel_analyzer as analyzer;

const BANNER: &str = r#"
   ____  _____ ___    ___       _       _
  / ___|| ____/ _ \  |_ _|_ __ | |_ ___| |
  \___ \|  _|| | | |  | || '_ \| __/ _ \ |
   ___) | |__| |_| |  | || | | | ||  __/ |
  |____/|_____\___/  |___|_| |_|\__\___|_|
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_magenta().bold());
    println!(
        "  {} {}\n",
        "AI-assisted SEO audits".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
