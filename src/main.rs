use clap::Parser;
use image::ImageReader;
use serde_json::json;
use std::path::PathBuf;

use shelfcount::{CountError, EmptySpaceDetector, ObjectCounter};

#[derive(Parser)]
#[command(name = "shelfcount")]
#[command(about = "Count discrete objects in shelf photographs")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Count empty shelf regions instead of objects
    #[arg(long)]
    empty_spaces: bool,

    /// Save the annotated image to this path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the result as a JSON object
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if args.verbose {
        println!("Loading image: {:?}", args.image_path);
    }

    let img = ImageReader::open(&args.image_path)?
        .decode()
        .map_err(CountError::DecodeFailure)?;

    if args.verbose {
        println!("Image loaded: {}x{}\n", img.width(), img.height());
    }

    if args.empty_spaces {
        let result = EmptySpaceDetector::new().with_verbose(args.verbose).detect(&img)?;

        if args.json {
            println!("{}", json!({ "empty_space_count": result.count }));
        } else {
            println!("\n=== Empty Space Detection Results ===");
            println!("Empty regions: {}", result.count);
        }

        if let Some(path) = args.output {
            result.annotated.save(&path)?;
            if args.verbose {
                println!("Annotated image saved to {:?}", path);
            }
        }
    } else {
        let result = ObjectCounter::new().with_verbose(args.verbose).count(&img)?;

        if args.json {
            println!(
                "{}",
                json!({
                    "object_count": result.count,
                    "method_used": result.method.label(),
                })
            );
        } else {
            println!("\n=== Object Counting Results ===");
            println!("Objects counted: {}", result.count);
            println!("Method used: {}", result.method);

            if args.verbose {
                let e = result.estimates;
                println!("\nIndividual estimates:");
                println!("  Contours: {}", e.contours);
                println!("  Connected components: {}", e.components);
                println!("  Circles: {}", e.circles);
                match e.watershed {
                    Some(w) => println!("  Watershed: {}", w),
                    None => println!("  Watershed: not computed"),
                }
            }
        }

        if let Some(path) = args.output {
            result.annotated.save(&path)?;
            if args.verbose {
                println!("Annotated image saved to {:?}", path);
            }
        }
    }

    Ok(())
}
