use approx::assert_relative_eq;
use quantal::{
    CalcError, Dimension, InterpreterResult, Quantity, RuntimeError, Unit, UnitRegistry,
};

fn registry() -> UnitRegistry {
    let mut registry = UnitRegistry::new();

    let length = |symbol, factor| Unit::new(symbol, Dimension::length(), factor);
    registry.add_unit("m", length("m", 1.0)).unwrap();
    registry.add_unit("cm", length("cm", 0.01)).unwrap();
    registry.add_unit("mm", length("mm", 0.001)).unwrap();
    registry.add_unit("km", length("km", 1000.0)).unwrap();
    registry.add_unit("in", length("in", 0.0254)).unwrap();
    registry.add_unit("ft", length("ft", 0.3048)).unwrap();

    let time = |symbol, factor| Unit::new(symbol, Dimension::time(), factor);
    registry.add_unit("s", time("s", 1.0)).unwrap();
    registry.add_unit("min", time("min", 60.0)).unwrap();
    registry.add_unit("h", time("h", 3600.0)).unwrap();

    registry
        .add_unit("kg", Unit::new("kg", Dimension::mass(), 1.0))
        .unwrap();
    registry
        .add_unit("g", Unit::new("g", Dimension::mass(), 0.001))
        .unwrap();

    registry
        .add_unit("K", Unit::new("K", Dimension::temperature(), 1.0))
        .unwrap();
    registry
        .add_unit(
            "°C",
            Unit::new_affine("°C", Dimension::temperature(), 1.0, 273.15),
        )
        .unwrap();
    registry
        .add_unit(
            "°F",
            Unit::new_affine(
                "°F",
                Dimension::temperature(),
                5.0 / 9.0,
                459.67 * 5.0 / 9.0,
            ),
        )
        .unwrap();

    registry
        .add_unit(
            "°",
            Unit::new("°", Dimension::none(), std::f64::consts::PI / 180.0),
        )
        .unwrap();

    registry
}

fn expect_quantity(input: &str) -> Quantity {
    match quantal::evaluate(input, &registry()) {
        Ok(InterpreterResult::Quantity(q)) => q,
        Ok(InterpreterResult::Quantities(_)) => {
            panic!("expected a single quantity for '{input}'")
        }
        Err(e) => panic!("evaluation of '{input}' failed: {e}"),
    }
}

fn expect_value(input: &str, expected: f64) {
    let quantity = expect_quantity(input);
    assert_relative_eq!(quantity.value().to_f64(), expected, epsilon = 1e-9);
}

fn expect_failure(input: &str, message_part: &str) {
    match quantal::evaluate(input, &registry()) {
        Ok(_) => panic!("expected '{input}' to fail"),
        Err(e) => {
            let message = e.to_string();
            assert!(
                message.contains(message_part),
                "error for '{input}' was '{message}', expected it to contain '{message_part}'"
            );
        }
    }
}

#[test]
fn plain_arithmetic() {
    expect_value("2 + 3 * 4", 14.0);
    expect_value("-2^2", -4.0);
    expect_value("(2 + 3) * 4", 20.0);
    expect_value("2 ** 10", 1024.0);
    expect_value("10 mod 3", 1.0);
    expect_value("1e3 + 1", 1001.0);
}

#[test]
fn quantities_and_implicit_multiplication() {
    let q = expect_quantity("5 m");
    assert_relative_eq!(q.value().to_f64(), 5.0);
    assert_eq!(q.unit().symbol(), Some("m"));

    expect_value("2 m + 50 cm", 2.5);
    expect_value("1 km - 100 m", 0.9);
    expect_value("3 kg * 2", 6.0);
}

#[test]
fn simple_conversions() {
    expect_value("2 km -> m", 2000.0);
    expect_value("1 m -> cm", 100.0);
    expect_value("1 in -> cm", 2.54);
    expect_value("90 min -> h", 1.5);
    expect_value("1 kg -> g", 1000.0);
}

#[test]
fn conversion_to_compound_targets() {
    expect_value("72 km / h -> m / s", 20.0);
    expect_value("1 m^2 -> cm^2", 10000.0);
    // the target may carry a magnitude, which scales the unit
    expect_value("1 km -> 2 m", 500.0);
}

#[test]
fn chained_conversions() {
    expect_value("1 km -> m -> cm", 100000.0);
    expect_value("100 °F -> °C -> °F", 100.0);
}

#[test]
fn affine_conversions() {
    expect_value("0 °C -> K", 273.15);
    expect_value("100 °C -> °F", 212.0);
    expect_value("32 °F -> °C", 0.0);
    expect_value("300 K -> °C", 26.85);
}

#[test]
fn multi_target_conversion_preserves_order() {
    match quantal::evaluate("1 m -> (cm, mm, km)", &registry()).unwrap() {
        InterpreterResult::Quantities(quantities) => {
            let symbols: Vec<_> = quantities.iter().map(|q| q.unit().symbol()).collect();
            assert_eq!(symbols, [Some("cm"), Some("mm"), Some("km")]);

            assert_relative_eq!(quantities[0].value().to_f64(), 100.0, epsilon = 1e-9);
            assert_relative_eq!(quantities[1].value().to_f64(), 1000.0, epsilon = 1e-9);
            assert_relative_eq!(quantities[2].value().to_f64(), 0.001, epsilon = 1e-9);
        }
        InterpreterResult::Quantity(_) => panic!("expected a sequence"),
    }
}

#[test]
fn single_parenthesized_target_is_a_plain_conversion() {
    assert!(matches!(
        quantal::evaluate("1 m -> (cm)", &registry()),
        Ok(InterpreterResult::Quantity(_))
    ));
    assert!(matches!(
        quantal::evaluate("1 m -> (cm,)", &registry()),
        Ok(InterpreterResult::Quantities(_))
    ));
}

#[test]
fn functions() {
    expect_value("sin(90 °)", 1.0);
    expect_value("cos(0)", 1.0);
    expect_value("sqrt(4 m^2) -> m", 2.0);
    expect_value("round(2.5 m) -> m", 3.0);
    expect_value("log10(1000)", 3.0);
    expect_value("atan2(1 m, 100 cm)", std::f64::consts::FRAC_PI_4);
}

#[test]
fn constants() {
    expect_value("tau / pi", 2.0);
    expect_value("180 ° -> pi", 1.0);
}

#[test]
fn unknown_identifiers() {
    expect_failure("7 xyzzy", "xyzzy");
    expect_failure("1 meterr", "meterr");
}

#[test]
fn dimension_errors() {
    expect_failure("1 m + 1 s", "Incompatible dimensions");
    expect_failure("1 m -> kg", "Incompatible dimensions");
    expect_failure("sin(1 m)", "scalar");
}

#[test]
fn offset_unit_errors() {
    expect_failure("°C * m", "offset");
    expect_failure("2 / °C", "offset");
    expect_failure("°C^2", "offset");
}

#[test]
fn domain_errors() {
    expect_failure("1 / 0", "Division by zero");
    expect_failure("1 / (0 m)", "Division by zero");
}

#[test]
fn syntax_errors() {
    for input in ["2 +", "(2 + 3", "2 2", "1 m -> ()", "->", "sin(1"] {
        assert!(
            matches!(
                quantal::evaluate(input, &registry()),
                Err(CalcError::ParseError(_))
            ),
            "expected a parse error for '{input}'"
        );
    }
}

#[test]
fn nested_multi_conversion_fails() {
    assert_eq!(
        quantal::evaluate("(1 m -> (cm, mm)) -> km", &registry()),
        Err(CalcError::RuntimeError(RuntimeError::NestedMultiConvert))
    );
}
