// directory/src/fallback.rs

//! Built-in sample listings shown by the public directory pages when the
//! backend cannot be reached, so the page stays usable. Admin pages never use
//! them.

use models::{Contact, Doctor, Hospital, Location, MedicalShop, PathologyLab, RecordId};

fn sample_id(id: &str) -> Option<RecordId> {
    RecordId::new(id).ok()
}

fn location(address: &str, city: &str, state: &str) -> Location {
    Location {
        address: address.to_string(),
        city: city.to_string(),
        state: state.to_string(),
    }
}

fn contact(phone: &str, email: &str) -> Contact {
    Contact {
        phone: phone.to_string(),
        email: email.to_string(),
    }
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: sample_id("sample-doctor-1"),
            name: "Dr. Anjali Verma".to_string(),
            specialty: "Cardiology".to_string(),
            qualifications: "MBBS, MD (Cardiology)".to_string(),
            experience_years: Some(15),
            bio: "Consultant cardiologist focused on preventive heart care.".to_string(),
            location: location("14 Residency Road", "Bengaluru", "Karnataka"),
            contact: contact("+91 80 4000 1001", "anjali.verma@example.com"),
            rating: Some(4.8),
            ..Default::default()
        },
        Doctor {
            id: sample_id("sample-doctor-2"),
            name: "Dr. Rohan Kulkarni".to_string(),
            specialty: "Pediatrics".to_string(),
            qualifications: "MBBS, DCH".to_string(),
            experience_years: Some(9),
            bio: "Child health and vaccination clinic.".to_string(),
            location: location("22 FC Road", "Pune", "Maharashtra"),
            contact: contact("+91 20 4000 2002", "rohan.kulkarni@example.com"),
            rating: Some(4.6),
            ..Default::default()
        },
        Doctor {
            id: sample_id("sample-doctor-3"),
            name: "Dr. Meera Iyer".to_string(),
            specialty: "Dermatology".to_string(),
            qualifications: "MBBS, MD (Dermatology)".to_string(),
            experience_years: Some(11),
            bio: "Skin, hair and nail care.".to_string(),
            location: location("5 Anna Salai", "Chennai", "Tamil Nadu"),
            contact: contact("+91 44 4000 3003", "meera.iyer@example.com"),
            rating: Some(4.5),
            ..Default::default()
        },
    ]
}

pub fn hospitals() -> Vec<Hospital> {
    vec![
        Hospital {
            id: sample_id("sample-hospital-1"),
            name: "City General Hospital".to_string(),
            location: location("1 Hospital Road", "Mumbai", "Maharashtra"),
            contact: contact("+91 22 4000 4004", "info@citygeneral.example.com"),
            specialties: list(&["Cardiology", "Orthopedics", "Neurology"]),
            facilities: list(&["ICU", "Pharmacy", "Blood Bank"]),
            emergency_services: true,
            bed_count: Some(350),
            rating: Some(4.4),
            image_url: None,
        },
        Hospital {
            id: sample_id("sample-hospital-2"),
            name: "Green Valley Clinic".to_string(),
            location: location("48 Lake View", "Bhopal", "Madhya Pradesh"),
            contact: contact("+91 755 400 5005", "care@greenvalley.example.com"),
            specialties: list(&["General Medicine", "Pediatrics"]),
            facilities: list(&["Laboratory", "X-Ray"]),
            emergency_services: false,
            bed_count: Some(40),
            rating: Some(4.1),
            image_url: None,
        },
    ]
}

pub fn medical_shops() -> Vec<MedicalShop> {
    vec![
        MedicalShop {
            id: sample_id("sample-shop-1"),
            name: "HealthPlus Pharmacy".to_string(),
            location: location("9 Park Street", "Kolkata", "West Bengal"),
            contact: contact("+91 33 4000 6006", "orders@healthplus.example.com"),
            services: list(&["Prescription Medicines", "Home Delivery", "24x7"]),
            opening_hours: Some("00:00-24:00".to_string()),
            rating: Some(4.3),
            image_url: None,
        },
        MedicalShop {
            id: sample_id("sample-shop-2"),
            name: "Care Chemists".to_string(),
            location: location("77 MG Road", "Jaipur", "Rajasthan"),
            contact: contact("+91 141 400 7007", "hello@carechemists.example.com"),
            services: list(&["Generic Medicines", "Health Supplements"]),
            opening_hours: Some("08:00-22:00".to_string()),
            rating: Some(4.0),
            image_url: None,
        },
    ]
}

pub fn pathology_labs() -> Vec<PathologyLab> {
    vec![
        PathologyLab {
            id: sample_id("sample-lab-1"),
            name: "Precision Diagnostics".to_string(),
            location: location("3 Civil Lines", "Nagpur", "Maharashtra"),
            contact: contact("+91 712 400 8008", "reports@precision.example.com"),
            tests_offered: list(&["Complete Blood Count", "Lipid Profile", "Thyroid Panel"]),
            opening_hours: Some("07:00-21:00".to_string()),
            rating: Some(4.7),
            image_url: None,
        },
        PathologyLab {
            id: sample_id("sample-lab-2"),
            name: "Metro Path Labs".to_string(),
            location: location("61 Ring Road", "Delhi", "Delhi"),
            contact: contact("+91 11 4000 9009", "support@metropath.example.com"),
            tests_offered: list(&["HbA1c", "Vitamin D", "Liver Function Test"]),
            opening_hours: Some("06:30-20:00".to_string()),
            rating: Some(4.2),
            image_url: None,
        },
    ]
}
