use super::models::OsmWay;
use roadgraph::RoadClass;

// Road class of the way, taken from its first `highway` tag.
// Ways without one, or with a value outside of the weight table, are not roads for us.
pub fn road_class(way: &OsmWay) -> Option<RoadClass> {
    way.tag("highway").and_then(RoadClass::from_highway)
}
