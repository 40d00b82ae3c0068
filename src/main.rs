use planar::core::prelude::*;
use planar::util::setup_log;

fn main() -> anyhow::Result<()> {
    setup_log().context("while setting up logging")?;
    run_test_cases();
    for degrees in [1.0, 7.5, 33.0, 90.0, 359.0] {
        report_rotation_drift(degrees, 100_000);
    }
    Ok(())
}

fn run_test_cases() {
    let a = Vector2::one();
    check_eq!(a * 2.0, Vector2::new(2.0, 2.0));
    check_eq!(2.0 * a, Vector2::new(2.0, 2.0));
    check_eq!(a * 2.0 - a, a);
    check_eq!(a * Vector2::right(), 1.0);
    check_eq!(Vector2::new(3.0, 4.0).length(), 5.0);

    check_almost_eq!(Vector2::right().rotate(45.0), Vector2::one().normalize());
    check_almost_eq!(Vector2::right().rotate(90.0), Vector2::up());
    check_almost_eq!(Vector2::right().rotate(135.0), Vector2::new(-1.0, 1.0).normalize());
    check_almost_eq!(Vector2::right().rotate(180.0), Vector2::left());
    check_almost_eq!(Vector2::right().rotate(225.0), Vector2::new(-1.0, -1.0).normalize());
    check_almost_eq!(Vector2::right().rotate(270.0), Vector2::down());
    check_almost_eq!(Vector2::right().rotate(315.0), Vector2::new(1.0, -1.0).normalize());
    check_almost_eq!(Vector2::right().rotate(360.0), Vector2::right());

    for vec in [Vector2::right(), Vector2::up(), Vector2::left(), Vector2::down()] {
        for degrees in [45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0] {
            check_almost_eq!(vec.rotate(degrees), vec.rotate(degrees - 360.0));
        }
        check_eq!(vec.angle(vec.rotate(90.0)), 90.0);
    }

    let reflected = Vector2::new(5.0, 3.0).reflect(Vector2::up());
    check_eq!(reflected, Ok(Vector2::new(5.0, -3.0)));
    check_eq!(Vector2::new(3.0, 4.0).truncate(1.0), Ok(Vector2::new(0.6, 0.8)));
    check!(Vector2::new(1.0, 2.0).try_add(vec!["x"]).is_unsupported());
    info!("sanity checks passed");
}

/// Rotates a unit vector `steps` times by `degrees` and logs how far it drifted.
fn report_rotation_drift(degrees: f64, steps: u32) {
    let stepwise = (0..steps).fold(Vector2::right(), |v, _| v.rotate(degrees));
    let once = Vector2::right().rotate(degrees * f64::from(steps));
    info!(
        "rotating by {degrees} degrees {steps} times: length {:.17}, {:e} from a single rotation",
        stepwise.length(),
        (stepwise - once).length()
    );
}
