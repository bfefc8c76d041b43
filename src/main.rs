fn main() {
    surge_sentinel_lib::run()
}
