use tracing::Level;

fn main() {
    dioxus_logger::init(Level::DEBUG).expect("failed to init logger");
    wt_webapp::start();
}
