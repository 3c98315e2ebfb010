use assert_matches::assert_matches;

use doctor_cell::services::directory::{filter_by_specialization, planar_distance, sort_by_distance};
use doctor_cell::{catalog, AppointmentChannel, DoctorDirectory, DoctorError, LocationCoords};

fn names(doctors: &[&doctor_cell::DoctorProfile]) -> Vec<String> {
    doctors.iter().map(|d| d.name.clone()).collect()
}

#[test]
fn test_default_view_is_whole_catalog_in_order() {
    let directory = DoctorDirectory::default();
    let doctors = directory.get_filtered_doctors(None, None);

    assert_eq!(doctors.len(), 8);
    let ids: Vec<&str> = doctors.iter().map(|d| d.id.as_str()).collect();
    let expected: Vec<&str> = catalog().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_cardiologist_filter_returns_single_doctor() {
    let doctors = DoctorDirectory::default().get_filtered_doctors(Some("Cardiologist"), None);
    assert_eq!(names(&doctors), vec!["Dr. Priya Sharma"]);
}

#[test]
fn test_filter_is_case_insensitive_substring() {
    let doctors = filter_by_specialization(catalog(), Some("pHySiC"));
    assert_eq!(names(&doctors), vec!["Dr. Rajesh Kumar"]);

    let doctors = filter_by_specialization(catalog(), Some("ologist"));
    assert_eq!(doctors.len(), 4);
    assert!(doctors.iter().all(|d| d.specialization.to_lowercase().contains("ologist")));
}

#[test]
fn test_unknown_specialization_yields_empty_list() {
    let doctors = DoctorDirectory::default().get_filtered_doctors(Some("Astrologer"), None);
    assert!(doctors.is_empty());
}

#[test]
fn test_sort_by_distance_orders_nearest_first() {
    let origin = LocationCoords::new(19.0600, 72.8300);
    let doctors = DoctorDirectory::default().get_filtered_doctors(None, Some(origin));

    assert_eq!(doctors.len(), 8);
    assert_eq!(doctors[0].id, "dr-rajesh-kumar-001");
    for pair in doctors.windows(2) {
        assert!(planar_distance(pair[0].coordinates, origin) <= planar_distance(pair[1].coordinates, origin));
    }
}

#[test]
fn test_sort_keeps_catalog_order_for_ties() {
    // Dr. Kavya Nair and Dr. Rohit Mehta share coordinates.
    let origin = LocationCoords::new(18.9667, 72.8081);
    let doctors = sort_by_distance(catalog().iter().collect(), Some(origin));

    assert_eq!(doctors[0].id, "dr-kavya-nair-006");
    assert_eq!(doctors[1].id, "dr-rohit-mehta-007");
}

#[test]
fn test_sort_without_origin_is_identity() {
    let input: Vec<_> = catalog().iter().rev().collect();
    let expected = names(&input);
    assert_eq!(names(&sort_by_distance(input, None)), expected);
}

#[test]
fn test_filter_then_sort() {
    let origin = LocationCoords::new(19.0330, 72.8397);
    let doctors = DoctorDirectory::default().get_filtered_doctors(Some("o"), Some(origin));

    assert!(doctors.iter().all(|d| d.specialization.to_lowercase().contains('o')));
    assert_eq!(doctors[0].id, "dr-vikram-singh-005");
}

#[test]
fn test_lookup_helpers() {
    let directory = DoctorDirectory::default();

    let doctor = directory.get_doctor_by_id("dr-priya-sharma-002").unwrap();
    assert_eq!(doctor.consultation_fee.fee_for(AppointmentChannel::Video), 1000);

    assert_matches!(
        directory.get_doctor_by_id("dr-nobody-999"),
        Err(DoctorError::NotFound(id)) if id == "dr-nobody-999"
    );

    let available = directory.get_available_doctors();
    assert_eq!(available.len(), 6);
    assert!(available.iter().all(|d| d.is_available));

    assert_eq!(directory.get_doctors_by_specialization("ent specialist").len(), 1);
    assert!(directory.get_doctors_by_specialization("ENT").is_empty());
    assert_eq!(directory.specializations().len(), 11);
}
