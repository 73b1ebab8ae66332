//! Draw a single line or circle and save it as PPM (or PNG) image
#![deny(warnings)]

use scanconv::*;
use std::{env, fs::File, io::BufWriter};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug, Clone, Copy)]
enum Algorithm {
    Dda,
    Bresenham,
    Circle,
}

#[derive(Debug)]
struct Args {
    algorithm: Algorithm,
    geometry: String,
    output_file: String,
    size: Size,
    fg: Rgb,
    bg: Rgb,
    markers: bool,
    verbose: bool,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            algorithm: Algorithm::Bresenham,
            geometry: String::new(),
            output_file: String::new(),
            size: Size::new(800, 600),
            fg: Rgb::BLACK,
            bg: Rgb::WHITE,
            markers: false,
            verbose: false,
        };
        let mut positional = 0;
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "draw".to_owned());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--help" => {
                    positional = 0;
                    break;
                }
                "-a" => {
                    result.algorithm = match args.next().ok_or("-a requires argument")?.as_ref() {
                        "dda" => Algorithm::Dda,
                        "bresenham" => Algorithm::Bresenham,
                        "circle" => Algorithm::Circle,
                        algorithm => return Err(format!("unknown algorithm: {}", algorithm).into()),
                    };
                }
                "-w" => {
                    result.size.width = args.next().ok_or("-w requires argument")?.parse()?;
                }
                "-h" => {
                    result.size.height = args.next().ok_or("-h requires argument")?.parse()?;
                }
                "-fg" => {
                    result.fg = args
                        .next()
                        .ok_or("-fg requires color #rrggbb argument")?
                        .parse()?;
                }
                "-bg" => {
                    result.bg = args
                        .next()
                        .ok_or("-bg requires color #rrggbb argument")?
                        .parse()?;
                }
                "-m" => {
                    result.markers = true;
                }
                "-v" => {
                    result.verbose = true;
                }
                _ => {
                    positional += 1;
                    match positional {
                        1 => result.geometry = arg,
                        2 => result.output_file = arg,
                        _ => return Err("unexpected positional argument".into()),
                    }
                }
            }
        }
        if positional < 2 {
            eprintln!("Draw a single line or circle and save it as an image");
            eprintln!("\nUSAGE:");
            eprintln!(
                "    {} [-a dda|bresenham|circle] [-w <width>] [-h <height>] [-fg <color>] [-bg <color>] [-m] [-v] <geometry> <out.ppm>",
                cmd
            );
            eprintln!("\nARGS:");
            eprintln!("    -a <algorithm>     rasterization algorithm (default: bresenham)");
            eprintln!("    -w <width>         canvas width (default: 800)");
            eprintln!("    -h <height>        canvas height (default: 600)");
            eprintln!("    -fg <color>        foreground color");
            eprintln!("    -bg <color>        background color");
            eprintln!("    -m                 mark endpoints or circle center");
            eprintln!("    -v                 print step table of the algorithm");
            eprintln!("    <geometry>         'x0,y0 x1,y1' for lines, 'cx,cy r' for circles");
            eprintln!(
                "    <out.ppm>          output image, PPM unless the name ends with .png ('-' means stdout)"
            );
            std::process::exit(1);
        }
        Ok(result)
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    let mut canvas = Canvas::new(args.size, args.bg);
    canvas.set_pen(args.fg);
    let mut log = StepLog::with_limit(10);

    let shape = match args.algorithm {
        Algorithm::Dda | Algorithm::Bresenham => {
            let line: LineSegment = args.geometry.parse()?;
            args.size.check_line(&line)?;
            let rasterizer: Box<dyn LineRasterizer> = match args.algorithm {
                Algorithm::Dda => Box::new(DdaLineRasterizer),
                _ => Box::new(BresenhamLineRasterizer),
            };
            rasterizer.rasterize_observed(line, &mut canvas, &mut log);
            match args.algorithm {
                Algorithm::Dda => Primitive::DdaLine { line },
                _ => Primitive::BresenhamLine { line },
            }
        }
        Algorithm::Circle => {
            let circle: Circle = args.geometry.parse()?;
            if args.size.check_circle(&circle)? == Fit::Clipped {
                eprintln!("warning: circle extends beyond canvas and will be clipped");
            }
            BresenhamCircleRasterizer.rasterize_observed(circle, &mut canvas, &mut log);
            Primitive::Circle { circle }
        }
    };
    if args.verbose {
        eprintln!("{}", log);
    }

    if args.markers {
        match shape {
            Primitive::DdaLine { line } | Primitive::BresenhamLine { line } => {
                canvas.set_pen(Rgb::RED).fill_disc(line.start(), 4);
                canvas.set_pen(Rgb::GREEN).fill_disc(line.end(), 4);
            }
            Primitive::Circle { circle } => {
                canvas.set_pen(Rgb::BLUE).cross(circle.center(), 5);
                canvas.fill_disc(circle.center(), 2);
            }
        }
    }

    let save = tracing::debug_span!("[save]", output = args.output_file.as_str());
    let _guard = save.enter();
    if args.output_file == "-" {
        canvas.write_ppm(std::io::stdout().lock())?;
    } else {
        let out = BufWriter::new(File::create(&args.output_file)?);
        if args.output_file.ends_with(".png") {
            write_png(&canvas, out)?;
        } else {
            canvas.write_ppm(out)?;
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(canvas: &Canvas, out: impl std::io::Write) -> Result<(), Error> {
    Ok(canvas.write_png(out)?)
}

#[cfg(not(feature = "png"))]
fn write_png(_canvas: &Canvas, _out: impl std::io::Write) -> Result<(), Error> {
    Err("PNG output requires the `png` feature".into())
}
