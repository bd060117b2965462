fn main() {
    println!("cargo:rerun-if-env-changed=THERMOGAUGE_CONFIG_JSON");

    // Only firmware builds need the ESP-IDF environment exported.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
