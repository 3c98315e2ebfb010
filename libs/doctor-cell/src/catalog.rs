use once_cell::sync::Lazy;

use crate::models::{ConsultationFees, DoctorProfile, LocationCoords, WeeklyAvailability};

pub const SPECIALIZATIONS: [&str; 11] = [
    "General Physician",
    "Cardiologist",
    "Dermatologist",
    "Neurologist",
    "Orthopedic",
    "Pediatrician",
    "Psychiatrist",
    "Ophthalmologist",
    "ENT Specialist",
    "Gastroenterologist",
    "Gynecologist",
];

static CATALOG: Lazy<Vec<DoctorProfile>> = Lazy::new(build_catalog);

/// The fixed doctor directory, built once and shared read-only.
pub fn catalog() -> &'static [DoctorProfile] {
    &CATALOG
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn build_catalog() -> Vec<DoctorProfile> {
    vec![
        DoctorProfile {
            id: "dr-rajesh-kumar-001".into(),
            name: "Dr. Rajesh Kumar".into(),
            specialization: "General Physician".into(),
            qualification: "MBBS, MD (Internal Medicine)".into(),
            experience_years: 15,
            rating: 4.8,
            review_count: 342,
            hospital: "Apollo Hospital".into(),
            address: "123 Health Street, Bandra West".into(),
            city: "Mumbai".into(),
            state: "Maharashtra".into(),
            pincode: "400050".into(),
            phone: "+91 9876543210".into(),
            email: "dr.rajesh@apollo.com".into(),
            consultation_fee: ConsultationFees { in_person: 800, call: 500, video: 600 },
            availability: WeeklyAvailability {
                days: strings(&["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]),
                time_slots: strings(&["09:00", "10:00", "11:00", "14:00", "15:00", "16:00", "17:00"]),
            },
            languages: strings(&["English", "Hindi", "Marathi"]),
            services: strings(&["General Consultation", "Health Checkup", "Diabetes Management", "Hypertension Care"]),
            about: "Dr. Rajesh Kumar is a highly experienced General Physician with over 15 years of practice. He specializes in preventive medicine and chronic disease management.".into(),
            education: strings(&["MBBS - King Edward Memorial Hospital, Mumbai", "MD Internal Medicine - AIIMS, Delhi"]),
            awards: strings(&["Best Doctor Award 2023", "Excellence in Patient Care 2022"]),
            is_available: true,
            next_available_slot: "Today 2:00 PM".into(),
            image: "https://images.pexels.com/photos/5327580/pexels-photo-5327580.jpeg?auto=compress&cs=tinysrgb&w=300&h=300&fit=crop".into(),
            coordinates: LocationCoords::new(19.0596, 72.8295),
        },
        DoctorProfile {
            id: "dr-priya-sharma-002".into(),
            name: "Dr. Priya Sharma".into(),
            specialization: "Cardiologist".into(),
            qualification: "MBBS, MD (Cardiology), DM (Cardiology)".into(),
            experience_years: 12,
            rating: 4.9,
            review_count: 256,
            hospital: "Fortis Hospital".into(),
            address: "456 Cardiac Care Center, Andheri East".into(),
            city: "Mumbai".into(),
            state: "Maharashtra".into(),
            pincode: "400069".into(),
            phone: "+91 9876543211".into(),
            email: "dr.priya@fortis.com".into(),
            consultation_fee: ConsultationFees { in_person: 1200, call: 800, video: 1000 },
            availability: WeeklyAvailability {
                days: strings(&["Monday", "Tuesday", "Wednesday", "Friday", "Saturday"]),
                time_slots: strings(&["10:00", "11:00", "12:00", "15:00", "16:00", "17:00"]),
            },
            languages: strings(&["English", "Hindi", "Gujarati"]),
            services: strings(&["Heart Disease Treatment", "ECG", "Echocardiography", "Cardiac Rehabilitation"]),
            about: "Dr. Priya Sharma is a renowned cardiologist specializing in interventional cardiology and heart disease prevention.".into(),
            education: strings(&["MBBS - Grant Medical College, Mumbai", "MD Cardiology - AIIMS, Delhi", "DM Cardiology - PGIMER, Chandigarh"]),
            awards: strings(&["Cardiology Excellence Award 2023", "Young Cardiologist Award 2021"]),
            is_available: true,
            next_available_slot: "Tomorrow 10:00 AM".into(),
            image: "https://images.pexels.com/photos/5327921/pexels-photo-5327921.jpeg?auto=compress&cs=tinysrgb&w=300&h=300&fit=crop".into(),
            coordinates: LocationCoords::new(19.1136, 72.8697),
        },
        DoctorProfile {
            id: "dr-amit-patel-003".into(),
            name: "Dr. Amit Patel".into(),
            specialization: "Dermatologist".into(),
            qualification: "MBBS, MD (Dermatology)".into(),
            experience_years: 10,
            rating: 4.7,
            review_count: 189,
            hospital: "Lilavati Hospital".into(),
            address: "789 Skin Care Clinic, Juhu".into(),
            city: "Mumbai".into(),
            state: "Maharashtra".into(),
            pincode: "400049".into(),
            phone: "+91 9876543212".into(),
            email: "dr.amit@lilavati.com".into(),
            consultation_fee: ConsultationFees { in_person: 1000, call: 600, video: 750 },
            availability: WeeklyAvailability {
                days: strings(&["Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]),
                time_slots: strings(&["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"]),
            },
            languages: strings(&["English", "Hindi", "Gujarati"]),
            services: strings(&["Acne Treatment", "Skin Cancer Screening", "Cosmetic Dermatology", "Hair Loss Treatment"]),
            about: "Dr. Amit Patel is a skilled dermatologist with expertise in both medical and cosmetic dermatology.".into(),
            education: strings(&["MBBS - B.J. Medical College, Ahmedabad", "MD Dermatology - AIIMS, Delhi"]),
            awards: strings(&["Best Dermatologist Award 2022", "Skin Care Excellence 2023"]),
            is_available: false,
            next_available_slot: "Tomorrow 2:00 PM".into(),
            image: "https://images.pexels.com/photos/5327656/pexels-photo-5327656.jpeg?auto=compress&cs=tinysrgb&w=300&h=300&fit=crop".into(),
            coordinates: LocationCoords::new(19.1075, 72.8263),
        },
        DoctorProfile {
            id: "dr-sneha-gupta-004".into(),
            name: "Dr. Sneha Gupta".into(),
            specialization: "Pediatrician".into(),
            qualification: "MBBS, MD (Pediatrics)".into(),
            experience_years: 8,
            rating: 4.9,
            review_count: 298,
            hospital: "Kokilaben Hospital".into(),
            address: "321 Children Care Center, Andheri West".into(),
            city: "Mumbai".into(),
            state: "Maharashtra".into(),
            pincode: "400053".into(),
            phone: "+91 9876543213".into(),
            email: "dr.sneha@kokilaben.com".into(),
            consultation_fee: ConsultationFees { in_person: 900, call: 550, video: 700 },
            availability: WeeklyAvailability {
                days: strings(&["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]),
                time_slots: strings(&["09:00", "10:00", "11:00", "12:00", "15:00", "16:00", "17:00"]),
            },
            languages: strings(&["English", "Hindi", "Bengali"]),
            services: strings(&["Child Health Checkup", "Vaccination", "Growth Monitoring", "Newborn Care"]),
            about: "Dr. Sneha Gupta is a compassionate pediatrician dedicated to providing comprehensive healthcare for children.".into(),
            education: strings(&["MBBS - Medical College, Kolkata", "MD Pediatrics - AIIMS, Delhi"]),
            awards: strings(&["Best Pediatrician Award 2023", "Child Care Excellence 2022"]),
            is_available: true,
            next_available_slot: "Today 4:00 PM".into(),
            image: "https://images.pexels.com/photos/5327585/pexels-photo-5327585.jpeg?auto=compress&cs=tinysrgb&w=300&h=300&fit=crop".into(),
            coordinates: LocationCoords::new(19.1368, 72.8261),
        },
        DoctorProfile {
            id: "dr-vikram-singh-005".into(),
            name: "Dr. Vikram Singh".into(),
            specialization: "Orthopedic".into(),
            qualification: "MBBS, MS (Orthopedics)".into(),
            experience_years: 18,
            rating: 4.8,
            review_count: 412,
            hospital: "Hinduja Hospital".into(),
            address: "654 Bone & Joint Center, Mahim".into(),
            city: "Mumbai".into(),
            state: "Maharashtra".into(),
            pincode: "400016".into(),
            phone: "+91 9876543214".into(),
            email: "dr.vikram@hinduja.com".into(),
            consultation_fee: ConsultationFees { in_person: 1500, call: 900, video: 1200 },
            availability: WeeklyAvailability {
                days: strings(&["Monday", "Wednesday", "Thursday", "Friday", "Saturday"]),
                time_slots: strings(&["10:00", "11:00", "12:00", "14:00", "15:00", "16:00"]),
            },
            languages: strings(&["English", "Hindi", "Punjabi"]),
            services: strings(&["Joint Replacement", "Sports Injury", "Fracture Treatment", "Arthritis Care"]),
            about: "Dr. Vikram Singh is a senior orthopedic surgeon with extensive experience in joint replacement and sports medicine.".into(),
            education: strings(&["MBBS - AIIMS, Delhi", "MS Orthopedics - PGIMER, Chandigarh"]),
            awards: strings(&["Orthopedic Excellence Award 2023", "Best Surgeon Award 2022"]),
            is_available: true,
            next_available_slot: "Tomorrow 11:00 AM".into(),
            image: "https://images.pexels.com/photos/5327647/pexels-photo-5327647.jpeg?auto=compress&cs=tinysrgb&w=300&h=300&fit=crop".into(),
            coordinates: LocationCoords::new(19.0330, 72.8397),
        },
        DoctorProfile {
            id: "dr-kavya-nair-006".into(),
            name: "Dr. Kavya Nair".into(),
            specialization: "Neurologist".into(),
            qualification: "MBBS, MD (Neurology), DM (Neurology)".into(),
            experience_years: 14,
            rating: 4.9,
            review_count: 167,
            hospital: "Breach Candy Hospital".into(),
            address: "987 Neuro Care Center, Breach Candy".into(),
            city: "Mumbai".into(),
            state: "Maharashtra".into(),
            pincode: "400026".into(),
            phone: "+91 9876543215".into(),
            email: "dr.kavya@breachcandy.com".into(),
            consultation_fee: ConsultationFees { in_person: 1800, call: 1200, video: 1500 },
            availability: WeeklyAvailability {
                days: strings(&["Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]),
                time_slots: strings(&["09:00", "10:00", "11:00", "15:00", "16:00", "17:00"]),
            },
            languages: strings(&["English", "Hindi", "Malayalam"]),
            services: strings(&["Stroke Treatment", "Epilepsy Care", "Migraine Treatment", "Neurological Disorders"]),
            about: "Dr. Kavya Nair is a distinguished neurologist specializing in stroke care and neurological disorders.".into(),
            education: strings(&["MBBS - Medical College, Trivandrum", "MD Neurology - NIMHANS, Bangalore", "DM Neurology - AIIMS, Delhi"]),
            awards: strings(&["Neurology Excellence Award 2023", "Best Neurologist Award 2022"]),
            is_available: false,
            next_available_slot: "Day after tomorrow 9:00 AM".into(),
            image: "https://images.pexels.com/photos/5327653/pexels-photo-5327653.jpeg?auto=compress&cs=tinysrgb&w=300&h=300&fit=crop".into(),
            coordinates: LocationCoords::new(18.9667, 72.8081),
        },
        DoctorProfile {
            id: "dr-rohit-mehta-007".into(),
            name: "Dr. Rohit Mehta".into(),
            specialization: "ENT Specialist".into(),
            qualification: "MBBS, MS (ENT)".into(),
            experience_years: 11,
            rating: 4.6,
            review_count: 234,
            hospital: "Jaslok Hospital".into(),
            address: "147 ENT Care Center, Pedder Road".into(),
            city: "Mumbai".into(),
            state: "Maharashtra".into(),
            pincode: "400026".into(),
            phone: "+91 9876543216".into(),
            email: "dr.rohit@jaslok.com".into(),
            consultation_fee: ConsultationFees { in_person: 1100, call: 700, video: 900 },
            availability: WeeklyAvailability {
                days: strings(&["Monday", "Tuesday", "Thursday", "Friday", "Saturday"]),
                time_slots: strings(&["09:00", "10:00", "11:00", "14:00", "15:00", "16:00", "17:00"]),
            },
            languages: strings(&["English", "Hindi", "Gujarati"]),
            services: strings(&["Hearing Loss Treatment", "Sinus Surgery", "Throat Disorders", "Voice Problems"]),
            about: "Dr. Rohit Mehta is an experienced ENT specialist with expertise in advanced surgical procedures.".into(),
            education: strings(&["MBBS - Grant Medical College, Mumbai", "MS ENT - KEM Hospital, Mumbai"]),
            awards: strings(&["ENT Excellence Award 2022", "Surgical Innovation Award 2023"]),
            is_available: true,
            next_available_slot: "Today 5:00 PM".into(),
            image: "https://images.pexels.com/photos/5327540/pexels-photo-5327540.jpeg?auto=compress&cs=tinysrgb&w=300&h=300&fit=crop".into(),
            coordinates: LocationCoords::new(18.9667, 72.8081),
        },
        DoctorProfile {
            id: "dr-anita-desai-008".into(),
            name: "Dr. Anita Desai".into(),
            specialization: "Gynecologist".into(),
            qualification: "MBBS, MD (Obstetrics & Gynecology)".into(),
            experience_years: 16,
            rating: 4.8,
            review_count: 387,
            hospital: "Wockhardt Hospital".into(),
            address: "258 Women Care Center, Bandra East".into(),
            city: "Mumbai".into(),
            state: "Maharashtra".into(),
            pincode: "400051".into(),
            phone: "+91 9876543217".into(),
            email: "dr.anita@wockhardt.com".into(),
            consultation_fee: ConsultationFees { in_person: 1300, call: 800, video: 1000 },
            availability: WeeklyAvailability {
                days: strings(&["Monday", "Tuesday", "Wednesday", "Friday", "Saturday"]),
                time_slots: strings(&["10:00", "11:00", "12:00", "15:00", "16:00", "17:00"]),
            },
            languages: strings(&["English", "Hindi", "Marathi"]),
            services: strings(&["Pregnancy Care", "Gynecological Surgery", "Fertility Treatment", "Menopause Management"]),
            about: "Dr. Anita Desai is a senior gynecologist with extensive experience in women's healthcare and fertility treatments.".into(),
            education: strings(&["MBBS - Seth G.S. Medical College, Mumbai", "MD Obstetrics & Gynecology - KEM Hospital, Mumbai"]),
            awards: strings(&["Women's Health Excellence Award 2023", "Best Gynecologist Award 2022"]),
            is_available: true,
            next_available_slot: "Tomorrow 3:00 PM".into(),
            image: "https://images.pexels.com/photos/5327532/pexels-photo-5327532.jpeg?auto=compress&cs=tinysrgb&w=300&h=300&fit=crop".into(),
            coordinates: LocationCoords::new(19.0544, 72.8406),
        },
    ]
}
