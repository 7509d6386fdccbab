//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

// up to 32bit value
pub fn is_positive_number(num: &str) -> Result<(), String> {
    let n = num.parse::<u32>();
    match n {
        Ok(n) => {
            if n > 0 {
                Ok(())
            } else {
                Err("Number must be greater than 0".into())
            }
        }
        Err(_) => Err("Number required".into()),
    }
}

pub fn can_fit_u16(num: &str) -> Result<(), String> {
    let n = num.parse::<u16>();
    match n {
        Ok(_) => Ok(()),
        Err(_) => Err("Number does not fit in range <0;65535>".into()),
    }
}

pub fn is_positive_float(num: &str) -> Result<(), String> {
    let n = num.parse::<f32>();
    match n {
        Ok(n) => {
            if n > 0.0 {
                Ok(())
            } else {
                Err("Number must be greater than 0.0".into())
            }
        }
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_float(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() => Ok(()),
        _ => Err("Finite number required".into()),
    }
}

pub fn is_field_of_view(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n > 0.0 && n < 180.0 => Ok(()),
        _ => Err("Angle in range (0;180) required".into()),
    }
}

pub const MODE_NAMES: &[&str] = &["slice", "mip", "iso", "composite", "tf2d"];
pub const INTERPOLATION_NAMES: &[&str] = &["nearest", "linear", "cubic"];
pub const SHADING_NAMES: &[&str] = &["none", "phong", "gooch"];
pub const GENERATOR_NAMES: &[&str] = &["solid", "sphere", "ramp", "noise"];
pub const DATA_TYPE_NAMES: &[&str] = &["byte", "short"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("vol-render")
        .version("0.1.0")
        .about("Render and generate .fld volumes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(render_command())
        .subcommand(generate_command())
}

fn render_command<'a>() -> Command<'a> {
    Command::new("render")
        .about("Render volume into a PNG image")
        .arg(
            Arg::new("file")
                .help("Volume in .fld format")
                .long("file")
                .short('f')
                .required(true)
                .takes_value(true)
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("mode")
                .help("Render mode")
                .long("mode")
                .short('m')
                .default_value("composite")
                .value_name("MODE")
                .possible_values(MODE_NAMES),
        )
        .arg(
            Arg::new("interpolation")
                .help("Sampling between voxels")
                .long("interpolation")
                .short('i')
                .default_value("linear")
                .value_name("NAME")
                .possible_values(INTERPOLATION_NAMES),
        )
        .arg(
            Arg::new("resolution")
                .help("Size of the image")
                .long("resolution")
                .short('r')
                .number_of_values(2)
                .value_names(&["W", "H"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .default_values(&["700", "700"])
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("camera-pos")
                .help("Camera position, looking at the volume center. Defaults to a corner view")
                .long("camera-pos")
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .allow_hyphen_values(true)
                .validator(is_float),
        )
        .arg(
            Arg::new("orthographic")
                .help("Use parallel projection")
                .long("orthographic"),
        )
        .arg(
            Arg::new("fov")
                .help("Vertical field of view of the perspective camera in degrees")
                .long("fov")
                .value_name("DEG")
                .default_value("60")
                .validator(is_field_of_view)
                .conflicts_with("orthographic"),
        )
        .arg(
            Arg::new("iso")
                .help("Isosurface value, defaults to the middle of the value range")
                .long("iso")
                .value_name("VALUE")
                .validator(is_float),
        )
        .arg(
            Arg::new("shading")
                .help("Shading model used with --volume-shading")
                .long("shading")
                .default_value("phong")
                .value_name("NAME")
                .possible_values(SHADING_NAMES),
        )
        .arg(
            Arg::new("volume-shading")
                .help("Shade samples using gradient")
                .long("volume-shading"),
        )
        .arg(
            Arg::new("light")
                .help("Additional white point light")
                .long("light")
                .multiple_occurrences(true)
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .allow_hyphen_values(true)
                .validator(is_float),
        )
        .arg(
            Arg::new("no-camera-light")
                .help("Do not light the scene from the camera, unless there is no other light")
                .long("no-camera-light"),
        )
        .arg(
            Arg::new("sample-step")
                .help("Distance between samples along a ray")
                .long("sample-step")
                .default_value("0.5")
                .value_name("STEP")
                .validator(is_positive_float),
        )
        .arg(
            Arg::new("threads")
                .help("Number of render threads, leave out to use all cores")
                .long("threads")
                .short('t')
                .value_name("N")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("sequential")
                .help("Render on the main thread only")
                .long("sequential")
                .conflicts_with("threads"),
        )
        .arg(
            Arg::new("output-file")
                .help("Image to write")
                .long("output-file")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("out.png")),
        )
}

fn generate_command<'a>() -> Command<'a> {
    Command::new("generate")
        .about("Volumetric data generator")
        .arg(
            Arg::new("dims")
                .help("Dimensions of volume")
                .long("dims")
                .short('d')
                .required(true)
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("generator")
                .help("Type of generator")
                .long("generator")
                .short('g')
                .required(true)
                .requires_ifs(&[
                    ("solid", "sample"), // if solid is set, require option sample
                    ("sphere", "sample"),
                ])
                .takes_value(true)
                .value_name("NAME")
                .possible_values(GENERATOR_NAMES),
        )
        .arg(
            Arg::new("data")
                .help("Sample type")
                .long("data")
                .default_value("byte")
                .value_name("TYPE")
                .possible_values(DATA_TYPE_NAMES),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for RNG, leave out for random seed")
                .long("seed")
                .value_name("SEED")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("sample")
                .help("Value of generated object")
                .long("sample")
                .value_name("VALUE")
                .validator(can_fit_u16),
        )
        .arg(
            Arg::new("output-file")
                .help("File name to output")
                .long("output-file")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("a.fld")),
        )
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn command_is_consistent() {
        get_command().debug_assert();
    }

    #[test]
    fn validators() {
        assert!(is_positive_number("12").is_ok());
        assert!(is_positive_number("0").is_err());
        assert!(is_positive_number("x").is_err());

        assert!(can_fit_u16("65535").is_ok());
        assert!(can_fit_u16("65536").is_err());

        assert!(is_positive_float("0.25").is_ok());
        assert!(is_positive_float("-1").is_err());

        assert!(is_float("-3.5").is_ok());
        assert!(is_float("inf").is_err());

        assert!(is_field_of_view("45").is_ok());
        assert!(is_field_of_view("0").is_err());
        assert!(is_field_of_view("180").is_err());
    }

    #[test]
    fn parse_render() {
        let matches = get_command()
            .try_get_matches_from([
                "vol-render",
                "render",
                "--file",
                "skull.fld",
                "--mode",
                "mip",
                "--resolution=320,200",
                "--light=-1,2,3",
                "--light=4,5,6",
            ])
            .unwrap();

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "render");
        assert_eq!(sub.value_of("mode"), Some("mip"));

        let res: Vec<_> = sub.values_of("resolution").unwrap().collect();
        assert_eq!(res, ["320", "200"]);

        let lights: Vec<_> = sub.values_of("light").unwrap().collect();
        assert_eq!(lights, ["-1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn generate_requires_sample() {
        let res = get_command().try_get_matches_from([
            "vol-render",
            "generate",
            "--dims=4,4,4",
            "--generator",
            "solid",
        ]);
        assert!(res.is_err());
    }
}
