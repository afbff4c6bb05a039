//! The batch transform: every configured marker, surveyed into the world
//! frame.

use crate::coordinates::Coordinate;
use crate::frames::World;
use crate::layout::Layout;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One marker's three tracked corners in the world frame, in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SurveyedMarker {
    pub id: u32,
    pub top_left: Coordinate<World>,
    pub top_right: Coordinate<World>,
    pub bottom_left: Coordinate<World>,
}

/// Surveys every marker of the layout into the world frame.
///
/// The scale factor and the dock→world transform are fixed for the whole
/// run; each marker is then surveyed independently, in layout order, with
/// exactly one output record per configured marker. The computation is pure:
/// the same layout always yields the same records.
#[must_use]
pub fn survey(layout: &Layout) -> Vec<SurveyedMarker> {
    let dock_to_world = layout.mounting().dock_to_world();
    let scale = layout.scale();

    tracing::debug!(
        markers = layout.markers().len(),
        scale = scale.meters_per_unit(),
        "surveying marker corners into the world frame"
    );

    layout
        .markers()
        .iter()
        .map(|marker| {
            let corners = marker.corners(scale);
            SurveyedMarker {
                id: marker.id(),
                top_left: dock_to_world.transform(corners.top_left),
                top_right: dock_to_world.transform(corners.top_right),
                bottom_left: dock_to_world.transform(corners.bottom_left),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::survey;
    use crate::coordinates::Coordinate;
    use crate::frames::World;
    use crate::layout::{DockMounting, Layout};
    use crate::marker::{DrawingPoint, Marker};
    use approx::assert_relative_eq;
    use rstest::rstest;
    use uom::si::f64::{Angle, Length};
    use uom::si::{angle::degree, length::meter};

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }
    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    /// The hand-measured docking-target layout this tool was first run
    /// against: three 100 mm markers on a dock rolled -25° and yawed -90°.
    fn reference_layout() -> Layout {
        let markers = vec![
            Marker::new(43, 100., DrawingPoint { x: 0., y: 100. }).expect("descriptor is valid"),
            Marker::new(44, 100., DrawingPoint { x: 100., y: 0. }).expect("descriptor is valid"),
            Marker::new(96, 100., DrawingPoint { x: 0., y: 0. }).expect("descriptor is valid"),
        ];
        let mounting = DockMounting::new(
            d(-25.),
            d(-90.),
            Coordinate::from_cartesian(m(-0.7053), m(0.3105), m(-0.8378)),
        );
        Layout::new(Some("mm"), markers, mounting).expect("ids are unique")
    }

    #[rstest]
    // surveyed positions from the reference target, in meters
    #[case(0, 43, (-0.6630, 0.3105, -0.7472), (-0.6630, 0.2105, -0.7472), (-0.6208, 0.3105, -0.6565))]
    #[case(1, 44, (-0.7053, 0.2105, -0.8378), (-0.7053, 0.1105, -0.8378), (-0.6630, 0.2105, -0.7472))]
    #[case(2, 96, (-0.7053, 0.3105, -0.8378), (-0.7053, 0.2105, -0.8378), (-0.6630, 0.3105, -0.7472))]
    fn reference_target_surveys_to_known_positions(
        #[case] index: usize,
        #[case] id: u32,
        #[case] top_left: (f64, f64, f64),
        #[case] top_right: (f64, f64, f64),
        #[case] bottom_left: (f64, f64, f64),
    ) {
        let surveyed = survey(&reference_layout());
        assert_eq!(surveyed.len(), 3);

        let at = |(x, y, z): (f64, f64, f64)| Coordinate::<World>::from_cartesian(m(x), m(y), m(z));
        let record = &surveyed[index];
        assert_eq!(record.id, id);
        assert_relative_eq!(record.top_left, at(top_left), epsilon = m(1e-3));
        assert_relative_eq!(record.top_right, at(top_right), epsilon = m(1e-3));
        assert_relative_eq!(record.bottom_left, at(bottom_left), epsilon = m(1e-3));
    }

    #[test]
    fn marker_96_sits_at_the_dock_origin() {
        // a marker drawn at (0, 0) has its top-left corner exactly at the
        // dock origin, so its world position is the dock position itself
        let surveyed = survey(&reference_layout());
        let record = surveyed.iter().find(|record| record.id == 96).expect("id 96 is configured");

        assert_relative_eq!(
            record.top_left,
            Coordinate::from_cartesian(m(-0.7053), m(0.3105), m(-0.8378)),
            epsilon = m(1e-12),
        );
    }

    #[test]
    fn corner_positions_are_exact_to_survey_precision() {
        // same fixture, but checked against full-precision expectations so a
        // quietly changed composition or scaling would not hide inside the
        // 1e-3 reporting tolerance
        let surveyed = survey(&reference_layout());
        let record = &surveyed[0];

        assert_eq!(record.id, 43);
        assert_relative_eq!(
            record.top_left,
            Coordinate::from_cartesian(
                m(-0.663_038_173_825_930_1),
                m(0.3105),
                m(-0.747_169_221_296_335),
            ),
            epsilon = m(1e-9),
        );
        assert_relative_eq!(
            record.bottom_left,
            Coordinate::from_cartesian(
                m(-0.620_776_347_651_860_2),
                m(0.3105),
                m(-0.656_538_442_592_67),
            ),
            epsilon = m(1e-9),
        );
    }

    #[test]
    fn surveying_twice_is_bit_identical() {
        let layout = reference_layout();
        assert_eq!(survey(&layout), survey(&layout));
    }

    #[test]
    fn one_record_per_marker_in_layout_order() {
        let surveyed = survey(&reference_layout());
        let ids: Vec<_> = surveyed.iter().map(|record| record.id).collect();
        assert_eq!(ids, [43, 44, 96]);
    }
}
