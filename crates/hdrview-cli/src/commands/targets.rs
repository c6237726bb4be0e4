//! Target table command

use anyhow::Result;

use hdrview_core::{ColorSpaceTag, ComponentType, TargetSpec};

pub fn run() -> Result<()> {
    println!("{:<14} {:>4} {:>5} {:>9}", "target", "bits", "alpha", "component");
    for tag in ColorSpaceTag::ALL {
        let spec = TargetSpec::for_tag(tag);
        let component = match spec.component {
            ComponentType::Fixed => "fixed",
            ComponentType::Float => "float",
        };
        println!(
            "{:<14} {:>4} {:>5} {:>9}",
            tag.name(),
            spec.channel_bits,
            spec.alpha_bits(),
            component
        );
    }
    Ok(())
}
