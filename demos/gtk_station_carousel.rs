use gtk4 as gtk;
use gtk4::prelude::*;

use station_carousel::api::CarouselConfig;
use station_carousel::core::{StationCatalog, Viewport};
use station_carousel::platform_gtk::GtkCarouselAdapter;

fn main() {
    let _ = station_carousel::telemetry::init_default_tracing();

    let app = gtk::Application::builder()
        .application_id("rs.station_carousel.demos.gtk_station_carousel")
        .build();
    app.connect_activate(build_ui);
    app.run();
}

fn build_ui(app: &gtk::Application) {
    let config = CarouselConfig::new(Viewport::new(420, 340));
    let adapter = match GtkCarouselAdapter::new(StationCatalog::builtin(), config) {
        Ok(adapter) => adapter,
        Err(err) => {
            eprintln!("failed to initialize station carousel: {err}");
            return;
        }
    };

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .title("Station carousel")
        .default_width(420)
        .default_height(340)
        .child(adapter.drawing_area())
        .build();

    // The adapter's closures keep the controller alive; the adapter itself can go.
    drop(adapter);
    window.present();
}
