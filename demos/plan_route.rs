//! Plans the maximum data volume deliverable between two ground stations
//! over a short window, using the default SKR model and a synthetic
//! propagator standing in for a real orbital-mechanics engine.

use anyhow::Result;
use qkd_maxcap_router::geometry::Vec3;
use qkd_maxcap_router::node::{GroundSiteDescriptor, Node, NodeDescriptor};
use qkd_maxcap_router::propagator::StaticPropagator;
use qkd_maxcap_router::skr::{DefaultSkrModel, SkrAdapter};
use qkd_maxcap_router::topocentric::SimpleTopocentric;
use qkd_maxcap_router::{plan_max_capacity, PlanResult, PlanningConfig, StateVector, TimeWindow};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("qkd_maxcap_router=info").init();

    let nodes = vec![
        Node::ground_station(
            -1,
            GroundSiteDescriptor { latitude_deg: 40.0, longitude_deg: -105.0, altitude_km: 1.6 },
        ),
        Node::ground_station(
            -2,
            GroundSiteDescriptor { latitude_deg: 48.8, longitude_deg: 2.3, altitude_km: 0.04 },
        ),
    ];

    let window = TimeWindow::new(0.0, 1.0, 1.0 / 1440.0)?;

    // A standalone demo has no live orbital propagator wired in; ground
    // stations don't move, so a constant-position stub is sufficient here.
    let propagator = StaticPropagator::new(|descriptor: &NodeDescriptor, _t| match descriptor {
        NodeDescriptor::GroundSite(site) => {
            let r = 6378.137 + site.altitude_km;
            let lat = site.latitude_deg.to_radians();
            let lon = site.longitude_deg.to_radians();
            StateVector {
                position_km: Vec3::new(r * lat.cos() * lon.cos(), r * lat.cos() * lon.sin(), r * lat.sin()),
                velocity_km_s: Vec3::new(0.0, 0.0, 0.0),
            }
        }
        NodeDescriptor::Satellite(_) => unreachable!("this demo only uses ground stations"),
    });

    let adapter = SkrAdapter::new(Box::new(DefaultSkrModel::default()), Box::new(SimpleTopocentric::new()));
    let config = PlanningConfig::default();

    match plan_max_capacity(&nodes, -1, -2, window, &propagator, &adapter, &config)? {
        PlanResult::Feasible { max_data_size, path } => {
            println!("Maximum deliverable volume: {max_data_size:.3} bits");
            println!("Route ({} hops):", path.hop_count());
            for hop in &path.hops {
                println!("  node {:>4} ({:?}) at t={:.6} day", hop.node_id, hop.kind, hop.arrival_time);
            }
        }
        PlanResult::Infeasible => {
            println!("No feasible route within the planning window.");
        }
    }

    Ok(())
}
