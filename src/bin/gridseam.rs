use gridseam::energy::calculate_energy;
use gridseam::find_vertical_seam;
use gridseam::overlay::{energy_to_image, seam_overlay};

use clap::{App, Arg};

fn main() -> Result<(), failure::Error> {
    let matches = App::new("gridseam")
        .version("0.1.0")
        .about("Find the lowest-energy vertical seam in an image")
        .arg(
            Arg::with_name("image")
                .help("The image to analyze")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("overlay")
                .short("o")
                .long("overlay")
                .takes_value(true)
                .value_name("FILE")
                .help("Write a copy of the image with the seam painted red"),
        )
        .arg(
            Arg::with_name("energy-map")
                .short("e")
                .long("energy-map")
                .takes_value(true)
                .value_name("FILE")
                .help("Write the normalized energy map as a graymap"),
        )
        .get_matches();

    let image = image::open(matches.value_of("image").unwrap())?;
    let energy = calculate_energy(&image);
    let seam = find_vertical_seam(&energy)?;

    if let Some(path) = matches.value_of("overlay") {
        seam_overlay(&image, &seam.columns).save(path)?;
    }
    if let Some(path) = matches.value_of("energy-map") {
        energy_to_image(&energy).save(path)?;
    }

    println!(
        "minimum seam energy was {} at x = {}",
        seam.total_energy,
        seam.end_x()
    );
    Ok(())
}
