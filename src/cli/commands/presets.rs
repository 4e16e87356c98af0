use crate::config::HarnessConfig;

pub fn execute() {
    println!("⚙️  利用可能なプリセット:");
    for (name, description) in HarnessConfig::presets() {
        println!("   - {name:<10} {description}");
    }
}
