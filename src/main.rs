fn main() {
    dioxus::launch(melodeck::components::App);
}
