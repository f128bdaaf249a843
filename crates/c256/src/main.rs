use c256::Image;

fn main() {
    env_logger::init();

    let images: Result<Vec<Image>, _> = std::env::args()
        .skip(1)
        .map(|arg| Image::parse(&arg))
        .collect();
    let images = match images {
        Ok(images) if !images.is_empty() => images,
        Ok(_) => {
            eprintln!(
                "No memory image provided.\n\
                 Usage: c256 <image>[@<hex-address>] ...\n\
                 Files ending in .hex are loaded as Intel HEX, anything else as a raw binary."
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    for image in &images {
        log::info!("Loading image '{}' at {}", image.path.display(), image.address);
    }

    if let Err(e) = c256::run(&images) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
