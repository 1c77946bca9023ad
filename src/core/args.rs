//! Per-run command line options
//!
//! Options are turned into session messages so they take the same path
//! as the option controls, including the readiness checks.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::capture::morphology::MorphologyMode;
use crate::domain::{
    Directions, ExpectedBarcodeCount, OptionError, Point, ScanInterval, Size, Symbologies,
};
use crate::session::messages::{ListMsg, Msg, ViewMsg};
use crate::session::state::Session;

pub const USAGE: &str = "\
Usage: barscope [OPTIONS] [IMAGE]

Without IMAGE an open dialog is shown and results appear in a dialog.
With IMAGE results are printed to stdout.
Options not given keep their saved values.

Options:
  --symbology NAME      Select only this symbology (repeatable), e.g. \"QR\"
  --all-symbologies     Select every symbology the engine supports
  --direction NAME      Select only this scan direction (repeatable),
                        e.g. \"Left to Right\" or \"East\"
  --all-directions      Select all eight scan directions
  --scan-interval N     Scan line spacing, 1-20
  --expected N          Stop after N barcodes (at least 1)
  --threshold           Binarise automatically before decoding
  --no-threshold        Binarise at a fixed grey level
  --morphology MODE     none, dilate or erode
  --fit WxH             Shrink the exported view to fit a WxH viewport
  --origin X,Y          Place the image at X,Y within the view
  --hide-rects          Leave bounding rectangles out of the overlay
  --hide-boxes          Leave oriented boxes out of the overlay
  -h, --help            Show this help";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },

    #[error("Unexpected argument: {0}")]
    Unexpected(String),

    #[error(transparent)]
    Option(#[from] OptionError),

    #[error("{0} is not supported by this engine")]
    NotOffered(String),
}

/// A list selection given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    /// Keep the saved selection
    Keep,
    All,
    Only(Vec<T>),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Keep
    }
}

impl<T> Selection<T> {
    fn push(&mut self, item: T) {
        match self {
            Selection::Only(items) => items.push(item),
            _ => *self = Selection::Only(vec![item]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunArgs {
    pub image: Option<PathBuf>,
    pub help: bool,
    pub symbologies: Selection<Symbologies>,
    pub directions: Selection<Directions>,
    pub scan_interval: Option<ScanInterval>,
    pub expected_count: Option<ExpectedBarcodeCount>,
    pub thresholding: Option<bool>,
    pub morphology: Option<MorphologyMode>,
    pub fit: Option<Size>,
    pub origin: Option<Point>,
    pub show_bounding_rects: Option<bool>,
    pub show_bounding_boxes: Option<bool>,
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, ArgsError> {
    args.next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

fn number<T: FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, ArgsError> {
    let text = value(args, flag)?;
    text.trim().parse().map_err(|_| ArgsError::InvalidValue {
        flag: flag.to_string(),
        value: text,
    })
}

fn parse_size(flag: &str, text: &str) -> Result<Size, ArgsError> {
    let invalid = || ArgsError::InvalidValue {
        flag: flag.to_string(),
        value: text.to_string(),
    };
    let (w, h) = text.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: u32 = w.trim().parse().map_err(|_| invalid())?;
    let height: u32 = h.trim().parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok(Size::new(width, height))
}

fn parse_point(flag: &str, text: &str) -> Result<Point, ArgsError> {
    let invalid = || ArgsError::InvalidValue {
        flag: flag.to_string(),
        value: text.to_string(),
    };
    let (x, y) = text.split_once(',').ok_or_else(invalid)?;
    let x: i32 = x.trim().parse().map_err(|_| invalid())?;
    let y: i32 = y.trim().parse().map_err(|_| invalid())?;
    Ok(Point::new(x, y))
}

impl RunArgs {
    /// Parse arguments, not including the program name
    pub fn parse<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = RunArgs::default();
        let mut args = args.into_iter().map(Into::<String>::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--symbology" => {
                    let name = value(&mut args, &arg)?;
                    parsed
                        .symbologies
                        .push(Symbologies::from_display_name(&name)?);
                }
                "--all-symbologies" => parsed.symbologies = Selection::All,
                "--direction" => {
                    let name = value(&mut args, &arg)?;
                    parsed.directions.push(Directions::from_label(&name)?);
                }
                "--all-directions" => parsed.directions = Selection::All,
                "--scan-interval" => {
                    parsed.scan_interval = Some(ScanInterval::new(number(&mut args, &arg)?)?);
                }
                "--expected" => {
                    parsed.expected_count =
                        Some(ExpectedBarcodeCount::new(number(&mut args, &arg)?)?);
                }
                "--threshold" => parsed.thresholding = Some(true),
                "--no-threshold" => parsed.thresholding = Some(false),
                "--morphology" => {
                    let mode = value(&mut args, &arg)?;
                    let parsed_mode = MorphologyMode::from_label(mode.trim()).ok_or_else(|| {
                        ArgsError::InvalidValue {
                            flag: arg.clone(),
                            value: mode.clone(),
                        }
                    })?;
                    parsed.morphology = Some(parsed_mode);
                }
                "--fit" => {
                    let text = value(&mut args, &arg)?;
                    parsed.fit = Some(parse_size(&arg, &text)?);
                }
                "--origin" => {
                    let text = value(&mut args, &arg)?;
                    parsed.origin = Some(parse_point(&arg, &text)?);
                }
                "--hide-rects" => parsed.show_bounding_rects = Some(false),
                "--hide-boxes" => parsed.show_bounding_boxes = Some(false),
                flag if flag.starts_with('-') => {
                    return Err(ArgsError::Unexpected(flag.to_string()));
                }
                path if parsed.image.is_none() => parsed.image = Some(PathBuf::from(path)),
                extra => return Err(ArgsError::Unexpected(extra.to_string())),
            }
        }
        Ok(parsed)
    }

    /// Messages that apply the options before an image is opened
    pub fn option_messages(&self, session: &Session) -> Result<Vec<Msg>, ArgsError> {
        let mut msgs = list_messages(
            &self.symbologies,
            &session.offered_symbologies(),
            Msg::Symbology,
            Symbologies::display_name,
        )?;
        msgs.extend(list_messages(
            &self.directions,
            &session.offered_directions(),
            Msg::Direction,
            Directions::compass_name,
        )?);

        msgs.extend(self.scan_interval.map(|v| Msg::ScanInterval(v.get() as i32)));
        msgs.extend(self.expected_count.map(|v| Msg::ExpectedCount(v.get() as i64)));
        msgs.extend(self.thresholding.map(Msg::Thresholding));
        if let Some(size) = self.fit {
            msgs.push(Msg::View(ViewMsg::Viewport(size.width, size.height)));
            msgs.push(Msg::View(ViewMsg::ShrinkToFit(true)));
        }
        msgs.extend(self.origin.map(|p| Msg::View(ViewMsg::Origin(p.x, p.y))));
        msgs.extend(
            self.show_bounding_rects
                .map(|flag| Msg::View(ViewMsg::ShowBoundingRects(flag))),
        );
        msgs.extend(
            self.show_bounding_boxes
                .map(|flag| Msg::View(ViewMsg::ShowBoundingBoxes(flag))),
        );
        Ok(msgs)
    }

    /// Messages that need a loaded image
    pub fn image_messages(&self) -> Vec<Msg> {
        self.morphology.map(Msg::Morphology).into_iter().collect()
    }
}

/// Check exactly the wanted entries, as a user would in the list
fn list_messages<T: Copy + PartialEq>(
    selection: &Selection<T>,
    offered: &[(T, &'static str)],
    wrap: fn(ListMsg) -> Msg,
    name: fn(T) -> Option<&'static str>,
) -> Result<Vec<Msg>, ArgsError> {
    let wanted = match selection {
        Selection::Keep => return Ok(Vec::new()),
        Selection::All => return Ok(vec![wrap(ListMsg::SelectAll)]),
        Selection::Only(wanted) => wanted,
    };
    let mut msgs = vec![wrap(ListMsg::ClearAll)];
    for item in wanted {
        let index = offered
            .iter()
            .position(|(offer, _)| offer == item)
            .ok_or_else(|| ArgsError::NotOffered(name(*item).unwrap_or("?").to_string()))?;
        msgs.push(wrap(ListMsg::ItemCheck {
            index,
            checked: true,
        }));
    }
    Ok(msgs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::recognition::orchestrator::tests::test_image;

    fn parse(args: &[&str]) -> Result<RunArgs, ArgsError> {
        RunArgs::parse(args.iter().copied())
    }

    fn session() -> Session {
        Session::new(&AppConfig::default(), Symbologies::QR | Symbologies::CODE_39)
    }

    #[test]
    fn test_parse_full_command_line() {
        let args = parse(&[
            "--symbology",
            "Code 39",
            "--symbology",
            "QR",
            "--direction",
            "Top to Bottom",
            "--scan-interval",
            "7",
            "--expected",
            "3",
            "--no-threshold",
            "--morphology",
            "Dilate",
            "--fit",
            "640x480",
            "--hide-boxes",
            "--origin",
            "10,-4",
            "scan.png",
        ])
        .unwrap();
        assert_eq!(
            args.symbologies,
            Selection::Only(vec![Symbologies::CODE_39, Symbologies::QR])
        );
        assert_eq!(args.directions, Selection::Only(vec![Directions::SOUTH]));
        assert_eq!(args.scan_interval, Some(ScanInterval::new(7).unwrap()));
        assert_eq!(args.expected_count.map(|c| c.get()), Some(3));
        assert_eq!(args.thresholding, Some(false));
        assert_eq!(args.morphology, Some(MorphologyMode::Dilate));
        assert_eq!(args.fit, Some(Size::new(640, 480)));
        assert_eq!(args.show_bounding_rects, None);
        assert_eq!(args.show_bounding_boxes, Some(false));
        assert_eq!(args.origin, Some(Point::new(10, -4)));
        assert_eq!(args.image, Some(PathBuf::from("scan.png")));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            parse(&["--scan-interval"]),
            Err(ArgsError::MissingValue("--scan-interval".into()))
        );
        assert!(matches!(
            parse(&["--scan-interval", "21"]),
            Err(ArgsError::Option(OptionError::OutOfRange { .. }))
        ));
        assert!(matches!(
            parse(&["--expected", "0"]),
            Err(ArgsError::Option(OptionError::OutOfRange { .. }))
        ));
        assert!(matches!(
            parse(&["--symbology", "Bogus"]),
            Err(ArgsError::Option(OptionError::UnknownSymbology(_)))
        ));
        assert!(matches!(
            parse(&["--fit", "640"]),
            Err(ArgsError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse(&["--origin", "10"]),
            Err(ArgsError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse(&["--morphology", "open"]),
            Err(ArgsError::InvalidValue { .. })
        ));
        assert_eq!(
            parse(&["--verbose"]),
            Err(ArgsError::Unexpected("--verbose".into()))
        );
        assert_eq!(
            parse(&["a.png", "b.png"]),
            Err(ArgsError::Unexpected("b.png".into()))
        );
    }

    #[test]
    fn test_no_arguments_keep_everything() {
        let args = parse(&[]).unwrap();
        assert_eq!(args, RunArgs::default());
        assert!(args.option_messages(&session()).unwrap().is_empty());
        assert!(args.image_messages().is_empty());
    }

    #[test]
    fn test_messages_drive_the_session() {
        let args = parse(&[
            "--symbology",
            "Code 39",
            "--all-directions",
            "--expected",
            "4",
            "--no-threshold",
            "--fit",
            "4x4",
            "--hide-rects",
            "--origin",
            "1,2",
            "--morphology",
            "erode",
        ])
        .unwrap();

        let mut s = session();
        for msg in args.option_messages(&s).unwrap() {
            s.update(msg);
        }
        s.update(Msg::Loaded(Ok(test_image())));
        for msg in args.image_messages() {
            s.update(msg);
        }

        assert_eq!(s.options.symbologies(), Symbologies::CODE_39);
        assert_eq!(s.options.directions(), Directions::all());
        assert_eq!(s.options.expected_count().get(), 4);
        assert!(!s.options.thresholding());
        assert!(s.view.shrink_to_fit);
        assert_eq!(s.view_transform().zoom, 0.5);
        assert_eq!(s.view.origin, Point::new(1, 2));
        assert!(!s.view.visibility.bounding_rects);
        assert!(s.view.visibility.bounding_boxes);
        assert_eq!(s.image.morphology, MorphologyMode::Erode);
        assert!(s.recognize_enabled);
    }

    #[test]
    fn test_unsupported_symbology_is_reported() {
        let args = parse(&["--symbology", "Aztec"]).unwrap();
        assert_eq!(
            args.option_messages(&session()).unwrap_err(),
            ArgsError::NotOffered("Aztec".into())
        );
    }
}
