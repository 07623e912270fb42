mod app;
mod editor;
mod geometry;
mod graph;
mod physics;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long)]
    graph: Option<String>,
    #[arg(long, default_value = "linkpad-session.json")]
    session: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "linkpad",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::LinkpadApp::new(
                cc,
                args.graph.clone(),
                args.session.clone(),
            )))
        }),
    )
}
